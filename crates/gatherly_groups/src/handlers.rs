//! Axum handlers for the group endpoints.

use crate::logic::{CreateGroupRequest, InviteInfo, JoinGroupRequest};
use crate::service::GroupsService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use gatherly_common::models::{CurrentUser, Group, User};
use gatherly_db::{EventRepository, GroupRepository};
use std::sync::Arc;

/// Shared state for the group handlers.
pub struct GroupsState<G, E>
where
    G: GroupRepository,
    E: EventRepository,
{
    pub service: GroupsService<G, E>,
}

/// POST /groups
pub async fn create_group_handler<G, E>(
    State(state): State<Arc<GroupsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let group = state
        .service
        .create_group(&current_user, payload)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /groups
pub async fn list_groups_handler<G, E>(
    State(state): State<Arc<GroupsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<Vec<Group>>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let groups = state
        .service
        .list_groups(&current_user)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(groups))
}

/// GET /groups/{group_id}
pub async fn get_group_handler<G, E>(
    State(state): State<Arc<GroupsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let group = state
        .service
        .get_group(&current_user, &group_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(group))
}

/// GET /groups/{group_id}/members
pub async fn list_members_handler<G, E>(
    State(state): State<Arc<GroupsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<User>>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let members = state
        .service
        .members(&current_user, &group_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(members))
}

/// POST /groups/join
pub async fn join_group_handler<G, E>(
    State(state): State<Arc<GroupsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<JoinGroupRequest>,
) -> Result<Json<Group>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let group = state
        .service
        .join_by_code(&current_user, &payload.invite_code)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(group))
}

/// POST /groups/{group_id}/leave
pub async fn leave_group_handler<G, E>(
    State(state): State<Arc<GroupsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    state
        .service
        .leave(&current_user, &group_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /groups/{group_id}/invite
pub async fn invite_info_handler<G, E>(
    State(state): State<Arc<GroupsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
) -> Result<Json<InviteInfo>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let info = state
        .service
        .invite_info(&current_user, &group_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(info))
}

/// POST /groups/{group_id}/invite/regenerate
pub async fn regenerate_code_handler<G, E>(
    State(state): State<Arc<GroupsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
) -> Result<Json<InviteInfo>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let info = state
        .service
        .regenerate_code(&current_user, &group_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(info))
}
