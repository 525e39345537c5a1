/// Persistence failures, classified far enough for the API layer to pick a
/// status code. Everything else stays a raw sqlx error and surfaces as 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("row not found")]
    RowNotFound,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// Maps unique-constraint violations (SQLSTATE 23505) to `Conflict`
    pub fn classify(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23505") {
                return StoreError::Conflict(format!("{} already exists", what));
            }
        }
        StoreError::Sqlx(err)
    }
}
