use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use mise_core::{PurchaseError, ValidationError};
use mise_store::StoreError;

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Shortage {
        message: String,
        insufficient: Vec<String>,
    },
    NotFound(String),
    Conflict(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    pub fn validation(err: ValidationError) -> Self {
        Self::Validation(err)
    }

    pub fn purchase(err: PurchaseError) -> Self {
        match err {
            PurchaseError::MenuItemNotFound(id) => {
                Self::NotFound(format!("Menu item not found: {}", id))
            }
            PurchaseError::Shortage(shortage) => Self::Shortage {
                message: shortage.to_string(),
                insufficient: shortage.insufficient,
            },
            PurchaseError::Storage(err) => Self::Anyhow(anyhow::anyhow!(err)),
        }
    }

    /// Classifies boxed errors coming out of the CRUD repository seams
    pub fn storage(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<StoreError>() {
            Ok(store_err) => match *store_err {
                StoreError::Conflict(msg) => Self::Conflict(msg),
                StoreError::RowNotFound => Self::NotFound("not found".to_string()),
                StoreError::Sqlx(e) => Self::Anyhow(anyhow::Error::new(e)),
            },
            Err(other) => Self::Anyhow(anyhow::anyhow!(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(err) => {
                let fields: serde_json::Map<String, serde_json::Value> = err
                    .errors
                    .iter()
                    .map(|e| (e.field.to_string(), json!(e.message)))
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "validation failed", "fields": fields }),
                )
            }
            AppError::Shortage {
                message,
                insufficient,
            } => (
                StatusCode::CONFLICT,
                json!({ "error": message, "insufficient": insufficient }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
