#![allow(dead_code)]
#![cfg(feature = "openapi")]

use crate::service::{AvailabilitySummary, UpdateAvailabilityRequest, UpsertAvailabilityRequest};
use gatherly_common::models::Availability;
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/groups/{group_id}/availability",
    params(
        ("group_id" = String, Path, description = "The group id")
    ),
    responses(
        (status = 200, description = "Every availability record in the group", body = Vec<Availability>),
        (status = 404, description = "Caller is not a member of the group", body = String)
    )
)]
fn doc_list_availability_handler() {}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/availability/mine",
    params(
        ("group_id" = String, Path, description = "The group id")
    ),
    responses(
        (status = 200, description = "The caller's availability records", body = Vec<Availability>),
        (status = 404, description = "Caller is not a member of the group", body = String)
    )
)]
fn doc_list_my_availability_handler() {}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/availability",
    params(
        ("group_id" = String, Path, description = "The group id")
    ),
    request_body(content = UpsertAvailabilityRequest, example = json!({
        "date": "2026-09-12",
        "kind": "range",
        "start_time": "09:00",
        "end_time": "12:00"
    })),
    responses(
        (status = 201, description = "Record stored, replacing any earlier record for the date", body = Availability),
        (status = 400, description = "Invalid date, time, or slots", body = String),
        (status = 404, description = "Caller is not a member of the group", body = String)
    )
)]
fn doc_upsert_availability_handler() {}

#[utoipa::path(
    patch,
    path = "/groups/{group_id}/availability/{availability_id}",
    params(
        ("group_id" = String, Path, description = "The group id"),
        ("availability_id" = String, Path, description = "The record id")
    ),
    request_body(content = UpdateAvailabilityRequest, example = json!({
        "kind": "slots",
        "slots": ["morning", "night"]
    })),
    responses(
        (status = 200, description = "The updated record", body = Availability),
        (status = 400, description = "Invalid time or slots", body = String),
        (status = 404, description = "No such record owned by the caller", body = String)
    )
)]
fn doc_update_availability_handler() {}

#[utoipa::path(
    delete,
    path = "/groups/{group_id}/availability/{availability_id}",
    params(
        ("group_id" = String, Path, description = "The group id"),
        ("availability_id" = String, Path, description = "The record id")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "No such record owned by the caller", body = String)
    )
)]
fn doc_delete_availability_handler() {}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/availability/summary",
    params(
        ("group_id" = String, Path, description = "The group id"),
        ("date" = Option<String>, Query, description = "Ask for a time-of-day suggestion for this date", example = "2026-09-12")
    ),
    responses(
        (status = 200, description = "Per-date counts, the recommended day, and the optional suggestion", body = AvailabilitySummary),
        (status = 404, description = "Caller is not a member of the group", body = String)
    )
)]
fn doc_summary_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_availability_handler,
        doc_list_my_availability_handler,
        doc_upsert_availability_handler,
        doc_update_availability_handler,
        doc_delete_availability_handler,
        doc_summary_handler
    ),
    components(schemas(
        UpsertAvailabilityRequest,
        UpdateAvailabilityRequest,
        AvailabilitySummary,
        Availability
    )),
    tags(
        (name = "availability", description = "Availability and best-day planning")
    ),
    servers(
        (url = "/api", description = "Main API prefix")
    )
)]
pub struct AvailabilityApiDoc;
