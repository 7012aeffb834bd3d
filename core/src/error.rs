use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A uniqueness or referential constraint would be broken.
    /// The store is left in its last consistent state.
    #[error("Constraint violation: {detail}")]
    ConstraintViolation { detail: String },

    /// Lookup by identifier found nothing. Never silently defaulted.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A generation parameter (or a query precondition) is out of its
    /// valid range. Rejected before any insert occurs.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DataResult<T> = Result<T, DataError>;
