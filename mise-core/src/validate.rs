use serde::Serialize;

/// A single rejected field on a create/update form
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Malformed or missing input; the operation is rejected with no state change
#[derive(Debug, Clone, thiserror::Error)]
#[error("validation failed: {}", .errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// Collects field errors across a form before rejecting it as a whole
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors: self.errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_validator_passes() {
        assert!(Validator::new().finish().is_ok());
    }

    #[test]
    fn test_collects_every_field() {
        let mut v = Validator::new();
        v.reject("name", "must not be empty");
        v.reject("price", "must not be negative");
        let err = v.finish().unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0].field, "name");
        assert_eq!(err.errors[1].field, "price");
    }
}
