//! Axum handlers for device-token and preference endpoints.

use crate::service::NotificationService;
use axum::{extract::State, http::StatusCode, response::Json, Extension};
use gatherly_common::models::CurrentUser;
use gatherly_db::{GroupRepository, PushRepository};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for the notification handlers.
pub struct NotificationsState<P, G>
where
    P: PushRepository,
    G: GroupRepository,
{
    pub service: Arc<NotificationService<P, G>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterTokenRequest {
    pub token: String,
    pub platform: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UnregisterTokenRequest {
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PreferenceRequest {
    pub notification_type: String,
    pub enabled: bool,
}

/// POST /notifications/token
pub async fn register_token_handler<P, G>(
    State(state): State<Arc<NotificationsState<P, G>>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<RegisterTokenRequest>,
) -> Result<StatusCode, (StatusCode, String)>
where
    P: PushRepository + Clone + Send + Sync + 'static,
    G: GroupRepository + Clone + Send + Sync + 'static,
{
    if payload.token.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Token must not be empty".to_string()));
    }

    state
        .service
        .register_token(&current_user.id, &payload.token, &payload.platform)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /notifications/token
pub async fn unregister_token_handler<P, G>(
    State(state): State<Arc<NotificationsState<P, G>>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UnregisterTokenRequest>,
) -> Result<StatusCode, (StatusCode, String)>
where
    P: PushRepository + Clone + Send + Sync + 'static,
    G: GroupRepository + Clone + Send + Sync + 'static,
{
    state
        .service
        .unregister_token(&current_user.id, &payload.token)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /notifications/preferences
pub async fn set_preference_handler<P, G>(
    State(state): State<Arc<NotificationsState<P, G>>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<PreferenceRequest>,
) -> Result<StatusCode, (StatusCode, String)>
where
    P: PushRepository + Clone + Send + Sync + 'static,
    G: GroupRepository + Clone + Send + Sync + 'static,
{
    if payload.notification_type.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Notification type must not be empty".to_string(),
        ));
    }

    state
        .service
        .set_preference(
            &current_user.id,
            &payload.notification_type,
            payload.enabled,
        )
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(StatusCode::NO_CONTENT)
}
