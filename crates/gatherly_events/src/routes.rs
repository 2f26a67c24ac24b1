use axum::{
    routing::{get, post},
    Router,
};
use gatherly_common::NotificationDispatcher;
use gatherly_db::{EventRepository, GroupRepository};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    create_event_handler, get_event_handler, list_events_handler, respond_handler, EventsState,
};
use crate::service::EventsService;

/// Create the event routes.
pub fn routes<G, E>(
    group_repo: G,
    event_repo: E,
    notifier: Option<Arc<dyn NotificationDispatcher>>,
) -> Router
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    E: EventRepository + Clone + Send + Sync + 'static,
{
    info!("Event routes initialized");

    let state = Arc::new(EventsState {
        service: EventsService::new(group_repo, event_repo, notifier),
    });

    Router::new()
        .route(
            "/groups/{group_id}/events",
            post(create_event_handler::<G, E>).get(list_events_handler::<G, E>),
        )
        .route(
            "/groups/{group_id}/events/{event_id}",
            get(get_event_handler::<G, E>),
        )
        .route(
            "/groups/{group_id}/events/{event_id}/respond",
            post(respond_handler::<G, E>),
        )
        .with_state(state)
}
