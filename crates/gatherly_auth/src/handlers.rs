//! Profile endpoint handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    Extension,
};
use gatherly_common::models::{CurrentUser, User};
use gatherly_db::UserRepository;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

/// State for the profile handlers.
#[derive(Clone)]
pub struct ProfileState<R: UserRepository> {
    pub user_repo: R,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar_emoji: Option<String>,
}

/// GET /auth/profile
pub async fn get_profile_handler<R>(
    State(state): State<Arc<ProfileState<R>>>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<User>, (StatusCode, String)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = state
        .user_repo
        .find_by_id(&current_user.id)
        .await
        .map_err(|e| {
            error!("Failed to load profile: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load profile".to_string(),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "User not found".to_string()))?;

    Ok(Json(user))
}

/// PATCH /auth/profile
pub async fn update_profile_handler<R>(
    State(state): State<Arc<ProfileState<R>>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<User>, (StatusCode, String)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let name = payload.name.as_deref().map(str::trim);
    if let Some(name) = name {
        if name.is_empty() {
            return Err((
                StatusCode::BAD_REQUEST,
                "Name must not be empty".to_string(),
            ));
        }
    }

    let user = state
        .user_repo
        .update_profile(&current_user.id, name, payload.avatar_emoji.as_deref())
        .await
        .map_err(|e| match e {
            gatherly_db::DbError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            other => {
                error!("Failed to update profile: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to update profile".to_string(),
                )
            }
        })?;

    Ok(Json(user))
}
