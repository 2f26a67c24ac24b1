#![allow(dead_code)]
#![cfg(feature = "openapi")]

use crate::handlers::{PreferenceRequest, RegisterTokenRequest, UnregisterTokenRequest};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/notifications/token",
    request_body(content = RegisterTokenRequest, example = json!({
        "token": "fcm-device-token",
        "platform": "ios"
    })),
    responses(
        (status = 204, description = "Token registered; re-registering moves it to the caller"),
        (status = 400, description = "Empty token", body = String)
    )
)]
fn doc_register_token_handler() {}

#[utoipa::path(
    delete,
    path = "/notifications/token",
    request_body(content = UnregisterTokenRequest, example = json!({
        "token": "fcm-device-token"
    })),
    responses(
        (status = 204, description = "Token removed"),
        (status = 404, description = "Token not registered to the caller", body = String)
    )
)]
fn doc_unregister_token_handler() {}

#[utoipa::path(
    put,
    path = "/notifications/preferences",
    request_body(content = PreferenceRequest, example = json!({
        "notification_type": "event_reminder",
        "enabled": false
    })),
    responses(
        (status = 204, description = "Preference stored; absent preferences default to enabled"),
        (status = 400, description = "Empty notification type", body = String)
    )
)]
fn doc_set_preference_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_register_token_handler,
        doc_unregister_token_handler,
        doc_set_preference_handler
    ),
    components(schemas(RegisterTokenRequest, UnregisterTokenRequest, PreferenceRequest)),
    tags(
        (name = "notifications", description = "Device tokens and push preferences")
    ),
    servers(
        (url = "/api", description = "Main API prefix")
    )
)]
pub struct NotificationsApiDoc;
