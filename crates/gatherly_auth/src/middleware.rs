//! Request authentication middleware.
//!
//! Every API route sits behind this layer. It verifies the bearer token,
//! resolves the subject to a user row (creating it on first sight), and
//! attaches a [`CurrentUser`] extension for the handlers downstream.

use crate::error::AuthError;
use crate::jwt::{verify_token, Claims};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use gatherly_common::models::{CurrentUser, User};
use gatherly_config::AppConfig;
use gatherly_db::UserRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// State for the auth middleware: the shared secret and the user store.
#[derive(Clone)]
pub struct AuthState<R: UserRepository> {
    pub config: Arc<AppConfig>,
    pub user_repo: R,
}

impl<R: UserRepository> AuthState<R> {
    pub fn new(config: Arc<AppConfig>, user_repo: R) -> Self {
        Self { config, user_repo }
    }
}

/// Axum middleware that authenticates API requests.
///
/// On success the request gains a [`CurrentUser`] extension; on failure the
/// request is answered with 401 without reaching the handler.
pub async fn require_auth<R>(
    axum::extract::State(state): axum::extract::State<Arc<AuthState<R>>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let secret = match state.config.auth.as_ref() {
        Some(auth) => auth.jwt_secret.clone(),
        None => {
            warn!("Auth configuration is missing, rejecting request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error".to_string(),
            )
                .into_response();
        }
    };

    let token = match bearer_token(&req) {
        Some(token) => token,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                "Missing bearer token".to_string(),
            )
                .into_response();
        }
    };

    let claims = match verify_token(token, &secret) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Token verification failed: {}", e);
            return (StatusCode::UNAUTHORIZED, "Invalid token".to_string()).into_response();
        }
    };

    let user = match resolve_user(&state.user_repo, &claims).await {
        Ok(user) => user,
        Err(e) => {
            warn!("Failed to resolve user {}: {}", claims.sub, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to resolve user".to_string(),
            )
                .into_response();
        }
    };

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        name: user.name,
    });

    next.run(req).await
}

fn bearer_token<'a>(req: &'a Request<Body>) -> Option<&'a str> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Find the subject's user row, creating it on first sight.
///
/// The name falls back to the email's local part, then to "there", so a
/// sparse token still yields a presentable user.
async fn resolve_user<R: UserRepository>(repo: &R, claims: &Claims) -> Result<User, AuthError> {
    if let Some(user) = repo.find_by_id(&claims.sub).await? {
        return Ok(user);
    }

    let email = claims.email.clone().unwrap_or_default();
    let name = claims
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| email.split('@').next().map(str::to_string))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "there".to_string());

    info!("Creating user on first sight: {}", claims.sub);

    let user = User {
        id: claims.sub.clone(),
        email,
        name,
        avatar_emoji: "😊".to_string(),
        created_at: Some(chrono::Utc::now().to_rfc3339()),
    };

    Ok(repo.create(user).await?)
}
