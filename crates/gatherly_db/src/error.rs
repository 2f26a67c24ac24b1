//! Error types for the database client

use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A row that the caller required was not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<DbError> for gatherly_common::GatherlyError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(message) => gatherly_common::GatherlyError::NotFoundError(message),
            other => gatherly_common::GatherlyError::DatabaseError(other.to_string()),
        }
    }
}
