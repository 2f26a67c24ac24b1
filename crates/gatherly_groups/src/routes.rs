use axum::{
    routing::{get, post},
    Router,
};
use gatherly_common::NotificationDispatcher;
use gatherly_config::InviteConfig;
use gatherly_db::{EventRepository, GroupRepository};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    create_group_handler, get_group_handler, invite_info_handler, join_group_handler,
    leave_group_handler, list_groups_handler, list_members_handler, regenerate_code_handler,
    GroupsState,
};
use crate::service::GroupsService;

/// Create the group routes.
pub fn routes<G, E>(
    group_repo: G,
    event_repo: E,
    notifier: Option<Arc<dyn NotificationDispatcher>>,
    invite: InviteConfig,
) -> Router
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    info!("Group routes initialized");

    let state = Arc::new(GroupsState {
        service: GroupsService::new(group_repo, event_repo, notifier, invite),
    });

    Router::new()
        .route(
            "/groups",
            post(create_group_handler::<G, E>).get(list_groups_handler::<G, E>),
        )
        .route("/groups/join", post(join_group_handler::<G, E>))
        .route("/groups/{group_id}", get(get_group_handler::<G, E>))
        .route(
            "/groups/{group_id}/members",
            get(list_members_handler::<G, E>),
        )
        .route("/groups/{group_id}/leave", post(leave_group_handler::<G, E>))
        .route(
            "/groups/{group_id}/invite",
            get(invite_info_handler::<G, E>),
        )
        .route(
            "/groups/{group_id}/invite/regenerate",
            post(regenerate_code_handler::<G, E>),
        )
        .with_state(state)
}
