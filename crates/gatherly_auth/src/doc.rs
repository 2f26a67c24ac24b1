#![allow(dead_code)]
#![cfg(feature = "openapi")]

use crate::handlers::UpdateProfileRequest;
use gatherly_common::models::User;
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/auth/profile",
    responses(
        (status = 200, description = "The authenticated user's profile", body = User),
        (status = 401, description = "Missing or invalid token", body = String)
    )
)]
fn doc_get_profile_handler() {}

#[utoipa::path(
    patch,
    path = "/auth/profile",
    request_body(content = UpdateProfileRequest, example = json!({
        "name": "Sam",
        "avatar_emoji": "🦊"
    })),
    responses(
        (status = 200, description = "The updated profile", body = User),
        (status = 400, description = "Empty name", body = String),
        (status = 401, description = "Missing or invalid token", body = String)
    )
)]
fn doc_update_profile_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_get_profile_handler, doc_update_profile_handler),
    components(schemas(UpdateProfileRequest, User)),
    tags(
        (name = "auth", description = "Profiles and authentication")
    ),
    servers(
        (url = "/api", description = "Main API prefix")
    )
)]
pub struct AuthApiDoc;
