use std::time::Duration;

/// Error type for connection management and store operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection could not be established (after retries)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// The operation did not complete within its deadline
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Generic(String),
}

impl DatabaseError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, DatabaseError::Timeout(_))
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
