use axum::{
    routing::{get, patch},
    Router,
};
use gatherly_db::{AvailabilityRepository, GroupRepository};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    delete_availability_handler, list_availability_handler, list_my_availability_handler,
    summary_handler, update_availability_handler, upsert_availability_handler, AvailabilityState,
};
use crate::service::AvailabilityService;

/// Create the availability routes.
pub fn routes<G, A>(group_repo: G, availability_repo: A) -> Router
where
    G: GroupRepository + Clone + Send + Sync + 'static,
    A: AvailabilityRepository + Clone + Send + Sync + 'static,
{
    info!("Availability routes initialized");

    let state = Arc::new(AvailabilityState {
        service: AvailabilityService::new(group_repo, availability_repo),
    });

    Router::new()
        .route(
            "/groups/{group_id}/availability",
            get(list_availability_handler::<G, A>).post(upsert_availability_handler::<G, A>),
        )
        .route(
            "/groups/{group_id}/availability/mine",
            get(list_my_availability_handler::<G, A>),
        )
        .route(
            "/groups/{group_id}/availability/summary",
            get(summary_handler::<G, A>),
        )
        .route(
            "/groups/{group_id}/availability/{availability_id}",
            patch(update_availability_handler::<G, A>)
                .delete(delete_availability_handler::<G, A>),
        )
        .with_state(state)
}
