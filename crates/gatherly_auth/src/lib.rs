//! Token verification and identity resolution for Gatherly
//!
//! The identity provider lives outside this service; clients present its
//! HS256 tokens on every request. This crate verifies them, resolves the
//! subject to a local user row (creating it lazily on first sight), and
//! exposes the profile endpoints.

pub mod doc;
pub mod error;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use error::AuthError;
pub use jwt::{verify_token, Claims};
pub use middleware::{require_auth, AuthState};
pub use routes::routes;

#[cfg(test)]
mod jwt_test;
