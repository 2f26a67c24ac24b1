#![allow(dead_code)]
#![cfg(feature = "openapi")]

use crate::logic::{CreateGroupRequest, InviteInfo, JoinGroupRequest};
use gatherly_common::models::{Group, User};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/groups",
    request_body(content = CreateGroupRequest, example = json!({
        "name": "Hiking crew",
        "emoji": "🏔️"
    })),
    responses(
        (status = 201, description = "Group created; the caller is the first member", body = Group),
        (status = 400, description = "Empty or overlong name", body = String),
        (status = 500, description = "Invite code generation exhausted its retry budget", body = String)
    )
)]
fn doc_create_group_handler() {}

#[utoipa::path(
    get,
    path = "/groups",
    responses(
        (status = 200, description = "The caller's groups", body = Vec<Group>)
    )
)]
fn doc_list_groups_handler() {}

#[utoipa::path(
    get,
    path = "/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "The group id")
    ),
    responses(
        (status = 200, description = "The group", body = Group),
        (status = 404, description = "Unknown group or caller not a member", body = String)
    )
)]
fn doc_get_group_handler() {}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/members",
    params(
        ("group_id" = String, Path, description = "The group id")
    ),
    responses(
        (status = 200, description = "The group's members", body = Vec<User>),
        (status = 404, description = "Unknown group or caller not a member", body = String)
    )
)]
fn doc_list_members_handler() {}

#[utoipa::path(
    post,
    path = "/groups/join",
    request_body(content = JoinGroupRequest, example = json!({ "invite_code": "41972630" })),
    responses(
        (status = 200, description = "Joined; the member is backfilled onto upcoming events", body = Group),
        (status = 404, description = "Invalid invite code", body = String),
        (status = 409, description = "Already a member", body = String)
    )
)]
fn doc_join_group_handler() {}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/leave",
    params(
        ("group_id" = String, Path, description = "The group id")
    ),
    responses(
        (status = 204, description = "Membership removed"),
        (status = 404, description = "Unknown group or caller not a member", body = String)
    )
)]
fn doc_leave_group_handler() {}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/invite",
    params(
        ("group_id" = String, Path, description = "The group id")
    ),
    responses(
        (status = 200, description = "The invite code and join link", body = InviteInfo),
        (status = 404, description = "Unknown group or caller not a member", body = String)
    )
)]
fn doc_invite_info_handler() {}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/invite/regenerate",
    params(
        ("group_id" = String, Path, description = "The group id")
    ),
    responses(
        (status = 200, description = "A fresh invite code; the old one no longer works", body = InviteInfo),
        (status = 404, description = "Unknown group or caller not a member", body = String),
        (status = 500, description = "Invite code generation exhausted its retry budget", body = String)
    )
)]
fn doc_regenerate_code_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_group_handler,
        doc_list_groups_handler,
        doc_get_group_handler,
        doc_list_members_handler,
        doc_join_group_handler,
        doc_leave_group_handler,
        doc_invite_info_handler,
        doc_regenerate_code_handler
    ),
    components(schemas(CreateGroupRequest, JoinGroupRequest, InviteInfo, Group, User)),
    tags(
        (name = "groups", description = "Groups and memberships")
    ),
    servers(
        (url = "/api", description = "Main API prefix")
    )
)]
pub struct GroupsApiDoc;
