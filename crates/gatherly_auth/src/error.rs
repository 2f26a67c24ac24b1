//! Error types for token verification and identity resolution.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The Authorization header is missing or not a Bearer token.
    #[error("Missing bearer token")]
    MissingToken,

    /// The token failed signature or claim validation.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The token is syntactically valid but has no subject.
    #[error("Token has no subject claim")]
    MissingSubject,

    /// The auth section of the configuration is absent.
    #[error("Auth configuration is missing")]
    NotConfigured,

    /// The user row could not be read or created.
    #[error("Database error: {0}")]
    Database(#[from] gatherly_db::DbError),
}
