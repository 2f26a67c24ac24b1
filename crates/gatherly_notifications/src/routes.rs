use axum::{
    routing::{post, put},
    Router,
};
use gatherly_db::{GroupRepository, PushRepository};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    register_token_handler, set_preference_handler, unregister_token_handler, NotificationsState,
};
use crate::service::NotificationService;

/// Create the notification routes.
///
/// The service is shared with the rest of the application, which also uses
/// it as the dispatcher behind group and event pushes.
pub fn routes<P, G>(service: Arc<NotificationService<P, G>>) -> Router
where
    P: PushRepository + Clone + Send + Sync + 'static,
    G: GroupRepository + Clone + Send + Sync + 'static,
{
    info!("Notification routes initialized");

    let state = Arc::new(NotificationsState { service });

    Router::new()
        .route(
            "/notifications/token",
            post(register_token_handler::<P, G>).delete(unregister_token_handler::<P, G>),
        )
        .route(
            "/notifications/preferences",
            put(set_preference_handler::<P, G>),
        )
        .with_state(state)
}
