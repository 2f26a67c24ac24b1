//! Axum handlers for the event endpoints.

use crate::logic::{CreateEventRequest, EventWithAttendees, RespondRequest};
use crate::service::EventsService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use gatherly_common::models::CurrentUser;
use gatherly_db::{EventRepository, GroupRepository};
use std::sync::Arc;

/// Shared state for the event handlers.
pub struct EventsState<G, E>
where
    G: GroupRepository,
    E: EventRepository,
{
    pub service: EventsService<G, E>,
}

/// POST /groups/{group_id}/events
pub async fn create_event_handler<G, E>(
    State(state): State<Arc<EventsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventWithAttendees>), (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let created = state
        .service
        .create_event(&current_user, &group_id, payload)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /groups/{group_id}/events
pub async fn list_events_handler<G, E>(
    State(state): State<Arc<EventsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<EventWithAttendees>>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let events = state
        .service
        .list_events(&current_user, &group_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(events))
}

/// GET /groups/{group_id}/events/{event_id}
pub async fn get_event_handler<G, E>(
    State(state): State<Arc<EventsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path((group_id, event_id)): Path<(String, String)>,
) -> Result<Json<EventWithAttendees>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let event = state
        .service
        .get_event(&current_user, &group_id, &event_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(event))
}

/// POST /groups/{group_id}/events/{event_id}/respond
pub async fn respond_handler<G, E>(
    State(state): State<Arc<EventsState<G, E>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path((group_id, event_id)): Path<(String, String)>,
    Json(payload): Json<RespondRequest>,
) -> Result<Json<EventWithAttendees>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    let event = state
        .service
        .respond(&current_user, &group_id, &event_id, &payload.status)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(event))
}
