#![allow(dead_code)]
#![cfg(feature = "openapi")]

use crate::logic::{CreateEventRequest, EventWithAttendees, RespondRequest};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/groups/{group_id}/events",
    params(
        ("group_id" = String, Path, description = "The group to plan the event in")
    ),
    request_body(content = CreateEventRequest, example = json!({
        "title": "Board game night",
        "description": "Bring snacks",
        "location": "Sam's place",
        "date": "2026-09-12",
        "time": "19:00"
    })),
    responses(
        (status = 201, description = "Event created with one attendee per member", body = EventWithAttendees),
        (status = 400, description = "Invalid title, date, or time", body = String),
        (status = 404, description = "Caller is not a member of the group", body = String)
    )
)]
fn doc_create_event_handler() {}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/events",
    params(
        ("group_id" = String, Path, description = "The group whose events to list")
    ),
    responses(
        (status = 200, description = "The group's events with attendees", body = Vec<EventWithAttendees>),
        (status = 404, description = "Caller is not a member of the group", body = String)
    )
)]
fn doc_list_events_handler() {}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/events/{event_id}",
    params(
        ("group_id" = String, Path, description = "The group the event belongs to"),
        ("event_id" = String, Path, description = "The event id")
    ),
    responses(
        (status = 200, description = "The event with its attendees", body = EventWithAttendees),
        (status = 404, description = "Event not found in this group", body = String)
    )
)]
fn doc_get_event_handler() {}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/events/{event_id}/respond",
    params(
        ("group_id" = String, Path, description = "The group the event belongs to"),
        ("event_id" = String, Path, description = "The event id")
    ),
    request_body(content = RespondRequest, example = json!({ "status": "confirmed" })),
    responses(
        (status = 200, description = "Response recorded; event status recomputed", body = EventWithAttendees),
        (status = 400, description = "Status is not confirmed or declined", body = String),
        (status = 404, description = "Event not found or caller not invited", body = String)
    )
)]
fn doc_respond_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_event_handler,
        doc_list_events_handler,
        doc_get_event_handler,
        doc_respond_handler
    ),
    components(schemas(CreateEventRequest, RespondRequest, EventWithAttendees)),
    tags(
        (name = "events", description = "Events and attendance")
    ),
    servers(
        (url = "/api", description = "Main API prefix")
    )
)]
pub struct EventsApiDoc;
