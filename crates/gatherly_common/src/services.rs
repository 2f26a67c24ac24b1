//! Service abstractions shared across crates.
//!
//! This module provides trait definitions for the cross-cutting services
//! consumed by the feature crates. The traits decouple the business services
//! (groups, events) from the concrete notification transport so they can be
//! tested with in-memory implementations.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

impl From<String> for BoxedError {
    fn from(message: String) -> Self {
        BoxedError(message.into())
    }
}

/// Result of a push fan-out: how many device sends succeeded.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct SendOutcome {
    pub sent: usize,
}

/// A trait for push-notification dispatch.
///
/// Business services call these methods as best-effort side effects after a
/// successful state change. Dispatch failures are always the dispatcher's or
/// the caller's to log and discard; they must never surface as a failure of
/// the triggering operation.
pub trait NotificationDispatcher: Send + Sync {
    /// Send a notification to every device registered for one user.
    fn send_to_user(
        &self,
        user_id: &str,
        title: &str,
        body: &str,
        data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, SendOutcome, BoxedError>;

    /// Send a notification to every member of a group, optionally excluding
    /// one user (typically the actor who triggered the notification).
    fn send_to_group(
        &self,
        group_id: &str,
        title: &str,
        body: &str,
        exclude_user_id: Option<&str>,
        data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, SendOutcome, BoxedError>;

    /// Whether the user has the given notification type enabled.
    /// Defaults to enabled when no preference row exists.
    fn is_notification_enabled(
        &self,
        user_id: &str,
        notification_type: &str,
    ) -> BoxFuture<'_, bool, BoxedError>;
}

/// Fire-and-forget group fan-out on a spawned task.
///
/// A `None` dispatcher (push disabled in configuration) is a no-op. Errors
/// are logged and discarded; the spawned task is never awaited by callers.
pub fn notify_group_detached(
    dispatcher: &Option<std::sync::Arc<dyn NotificationDispatcher>>,
    group_id: &str,
    title: &str,
    body: &str,
    exclude_user_id: Option<&str>,
    data: Option<HashMap<String, String>>,
) {
    let Some(dispatcher) = dispatcher else {
        return;
    };

    let dispatcher = std::sync::Arc::clone(dispatcher);
    let group_id = group_id.to_string();
    let title = title.to_string();
    let body = body.to_string();
    let exclude = exclude_user_id.map(str::to_string);

    tokio::spawn(async move {
        match dispatcher
            .send_to_group(&group_id, &title, &body, exclude.as_deref(), data)
            .await
        {
            Ok(outcome) => {
                tracing::debug!(
                    "Group notification dispatched to {}: {} sent",
                    group_id,
                    outcome.sent
                );
            }
            Err(e) => {
                tracing::warn!("Group notification to {} failed: {}", group_id, e);
            }
        }
    });
}

/// Fire-and-forget single-user dispatch on a spawned task.
pub fn notify_user_detached(
    dispatcher: &Option<std::sync::Arc<dyn NotificationDispatcher>>,
    user_id: &str,
    title: &str,
    body: &str,
    data: Option<HashMap<String, String>>,
) {
    let Some(dispatcher) = dispatcher else {
        return;
    };

    let dispatcher = std::sync::Arc::clone(dispatcher);
    let user_id = user_id.to_string();
    let title = title.to_string();
    let body = body.to_string();

    tokio::spawn(async move {
        if let Err(e) = dispatcher
            .send_to_user(&user_id, &title, &body, data)
            .await
        {
            tracing::warn!("Notification to user {} failed: {}", user_id, e);
        }
    });
}
