//! JWT verification with the HS256 algorithm.
//!
//! Tokens are issued by the external identity provider and verified here with
//! a shared secret. Only verification is needed; this service never mints
//! tokens outside of tests.

use crate::error::AuthError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// The claims this service reads from a verified token.
///
/// `sub` is the external subject id and becomes the user id. `email` and
/// `name` seed the user row the first time a subject is seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: usize,
}

/// Verify a token's signature and expiry and return its claims.
///
/// # Errors
///
/// Returns [`AuthError::InvalidToken`] if the signature does not match or the
/// token is expired, and [`AuthError::MissingSubject`] if `sub` is empty.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 60;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    if data.claims.sub.is_empty() {
        return Err(AuthError::MissingSubject);
    }

    Ok(data.claims)
}

#[cfg(test)]
pub fn encode_token(claims: &Claims, secret: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("test token encoding")
}
