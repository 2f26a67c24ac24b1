//! Axum handlers for the availability endpoints.

use crate::service::{
    AvailabilityService, AvailabilitySummary, UpdateAvailabilityRequest, UpsertAvailabilityRequest,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use gatherly_common::models::{Availability, CurrentUser};
use gatherly_db::{AvailabilityRepository, GroupRepository};
use serde::Deserialize;
use std::sync::Arc;

/// Shared state for the availability handlers.
pub struct AvailabilityState<G, A>
where
    G: GroupRepository,
    A: AvailabilityRepository,
{
    pub service: AvailabilityService<G, A>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Ask for a time-of-day suggestion for this `YYYY-MM-DD` date.
    pub date: Option<String>,
}

/// GET /groups/{group_id}/availability
pub async fn list_availability_handler<G, A>(
    State(state): State<Arc<AvailabilityState<G, A>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Availability>>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    A: AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let records = state
        .service
        .list(&current_user, &group_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(records))
}

/// GET /groups/{group_id}/availability/mine
pub async fn list_my_availability_handler<G, A>(
    State(state): State<Arc<AvailabilityState<G, A>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Availability>>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    A: AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let records = state
        .service
        .list_mine(&current_user, &group_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(records))
}

/// POST /groups/{group_id}/availability
pub async fn upsert_availability_handler<G, A>(
    State(state): State<Arc<AvailabilityState<G, A>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
    Json(payload): Json<UpsertAvailabilityRequest>,
) -> Result<(StatusCode, Json<Availability>), (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    A: AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let stored = state
        .service
        .upsert(&current_user, &group_id, payload)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// PATCH /groups/{group_id}/availability/{availability_id}
pub async fn update_availability_handler<G, A>(
    State(state): State<Arc<AvailabilityState<G, A>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path((group_id, availability_id)): Path<(String, String)>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<Json<Availability>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    A: AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let updated = state
        .service
        .update(&current_user, &group_id, &availability_id, payload)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(updated))
}

/// DELETE /groups/{group_id}/availability/{availability_id}
pub async fn delete_availability_handler<G, A>(
    State(state): State<Arc<AvailabilityState<G, A>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path((group_id, availability_id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    A: AvailabilityRepository + Clone + Send + Sync + 'static,
{
    state
        .service
        .delete(&current_user, &group_id, &availability_id)
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /groups/{group_id}/availability/summary
pub async fn summary_handler<G, A>(
    State(state): State<Arc<AvailabilityState<G, A>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<AvailabilitySummary>, (StatusCode, String)>
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    A: AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let summary = state
        .service
        .summary(&current_user, &group_id, query.date.as_deref())
        .await
        .map_err(|e| e.into_response_parts())?;

    Ok(Json(summary))
}
