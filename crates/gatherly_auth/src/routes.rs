use axum::{
    routing::get,
    Router,
};
use gatherly_db::UserRepository;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{get_profile_handler, update_profile_handler, ProfileState};

/// Create the profile routes.
///
/// The auth middleware itself is applied once for the whole API by the
/// backend binary; these routes only expose the profile of the already
/// authenticated caller.
pub fn routes<R>(user_repo: R) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    info!("Auth routes initialized");

    let state = Arc::new(ProfileState { user_repo });

    Router::new()
        .route(
            "/auth/profile",
            get(get_profile_handler::<R>).patch(update_profile_handler::<R>),
        )
        .with_state(state)
}
