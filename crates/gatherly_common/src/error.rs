use std::fmt;
use thiserror::Error;

/// The base error type for all Gatherly errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for GatherlyError.
#[derive(Error, Debug)]
pub enum GatherlyError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred because a bounded retry budget ran out
    /// (e.g., invite-code generation kept colliding)
    #[error("Exhausted: {0}")]
    ExhaustedError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for GatherlyError {
    fn status_code(&self) -> u16 {
        match self {
            GatherlyError::ParseError(_) => 400,
            GatherlyError::ConfigError(_) => 500,
            GatherlyError::AuthError(_) => 401,
            GatherlyError::ValidationError(_) => 400,
            GatherlyError::DatabaseError(_) => 500,
            GatherlyError::ExternalServiceError { .. } => 502,
            GatherlyError::ConflictError(_) => 409,
            GatherlyError::NotFoundError(_) => 404,
            GatherlyError::ExhaustedError(_) => 500,
            GatherlyError::InternalError(_) => 500,
        }
    }
}

impl GatherlyError {
    /// Converts this error into the `(StatusCode, String)` pair used by
    /// the axum handlers across the API crates.
    pub fn into_response_parts(self) -> (axum::http::StatusCode, String) {
        let status = axum::http::StatusCode::from_u16(self.status_code())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, self.to_string())
    }
}

impl From<serde_json::Error> for GatherlyError {
    fn from(err: serde_json::Error) -> Self {
        GatherlyError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> GatherlyError {
    GatherlyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> GatherlyError {
    GatherlyError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> GatherlyError {
    GatherlyError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> GatherlyError {
    GatherlyError::ConflictError(message.to_string())
}

pub fn exhausted<T: fmt::Display>(message: T) -> GatherlyError {
    GatherlyError::ExhaustedError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> GatherlyError {
    GatherlyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> GatherlyError {
    GatherlyError::InternalError(message.to_string())
}
