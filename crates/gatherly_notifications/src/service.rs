//! The notification dispatcher: token resolution, fan-out, and pruning.

use crate::sender::{PushSendError, PushSender};
use gatherly_common::models::{NotificationPreference, PushToken};
use gatherly_common::{BoxFuture, BoxedError, GatherlyError, NotificationDispatcher, SendOutcome};
use gatherly_db::{GroupRepository, PushRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dispatcher over the push store, the group store (for member fan-out),
/// and a per-token sender.
pub struct NotificationService<P, G>
where
    P: PushRepository,
    G: GroupRepository,
{
    push_repo: P,
    group_repo: G,
    sender: Arc<dyn PushSender>,
}

impl<P, G> NotificationService<P, G>
where
    P: PushRepository + Clone + Send + Sync + 'static,
    G: GroupRepository + Clone + Send + Sync + 'static,
{
    pub fn new(push_repo: P, group_repo: G, sender: Arc<dyn PushSender>) -> Self {
        Self {
            push_repo,
            group_repo,
            sender,
        }
    }

    /// Register a device token for the caller; re-registering an existing
    /// token moves it to this user.
    pub async fn register_token(
        &self,
        user_id: &str,
        token: &str,
        platform: &str,
    ) -> Result<(), GatherlyError> {
        self.push_repo
            .upsert_token(PushToken {
                user_id: user_id.to_string(),
                token: token.to_string(),
                platform: platform.to_string(),
            })
            .await?;
        Ok(())
    }

    /// Remove one of the caller's device tokens.
    pub async fn unregister_token(&self, user_id: &str, token: &str) -> Result<(), GatherlyError> {
        let removed = self.push_repo.delete_token(user_id, token).await?;
        if !removed {
            return Err(gatherly_common::not_found("Token not registered"));
        }
        Ok(())
    }

    /// Set a per-type opt-out flag for the caller.
    pub async fn set_preference(
        &self,
        user_id: &str,
        notification_type: &str,
        enabled: bool,
    ) -> Result<(), GatherlyError> {
        self.push_repo
            .upsert_preference(NotificationPreference {
                user_id: user_id.to_string(),
                notification_type: notification_type.to_string(),
                enabled,
            })
            .await?;
        Ok(())
    }

    /// Send to a set of tokens, pruning the ones FCM rejects as dead.
    async fn fan_out(
        &self,
        tokens: Vec<PushToken>,
        title: &str,
        body: &str,
        data: Option<HashMap<String, String>>,
    ) -> SendOutcome {
        let mut sent = 0;

        for push_token in &tokens {
            match self
                .sender
                .send(&push_token.token, title, body, data.clone())
                .await
            {
                Ok(()) => sent += 1,
                Err(PushSendError::InvalidToken) => {
                    info!("Pruning invalid push token of user {}", push_token.user_id);
                    if let Err(e) = self.push_repo.delete_token_value(&push_token.token).await {
                        warn!("Failed to prune push token: {}", e);
                    }
                }
                Err(PushSendError::Failed(reason)) => {
                    warn!(
                        "Push send to user {} failed: {}",
                        push_token.user_id, reason
                    );
                }
            }
        }

        debug!("Fan-out complete: {}/{} sent", sent, tokens.len());
        SendOutcome { sent }
    }
}

impl<P, G> NotificationDispatcher for NotificationService<P, G>
where
    P: PushRepository + Clone + Send + Sync + 'static,
    G: GroupRepository + Clone + Send + Sync + 'static,
{
    fn send_to_user(
        &self,
        user_id: &str,
        title: &str,
        body: &str,
        data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, SendOutcome, BoxedError> {
        let user_id = user_id.to_string();
        let title = title.to_string();
        let body = body.to_string();

        Box::pin(async move {
            let tokens = self
                .push_repo
                .list_tokens_for_user(&user_id)
                .await
                .map_err(|e| BoxedError::from(e.to_string()))?;

            Ok(self.fan_out(tokens, &title, &body, data).await)
        })
    }

    fn send_to_group(
        &self,
        group_id: &str,
        title: &str,
        body: &str,
        exclude_user_id: Option<&str>,
        data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, SendOutcome, BoxedError> {
        let group_id = group_id.to_string();
        let title = title.to_string();
        let body = body.to_string();
        let exclude = exclude_user_id.map(str::to_string);

        Box::pin(async move {
            let members = self
                .group_repo
                .list_members(&group_id)
                .await
                .map_err(|e| BoxedError::from(e.to_string()))?;

            let recipient_ids: Vec<String> = members
                .into_iter()
                .map(|m| m.user_id)
                .filter(|id| Some(id.as_str()) != exclude.as_deref())
                .collect();

            if recipient_ids.is_empty() {
                return Ok(SendOutcome::default());
            }

            let tokens = self
                .push_repo
                .list_tokens_for_users(&recipient_ids)
                .await
                .map_err(|e| BoxedError::from(e.to_string()))?;

            Ok(self.fan_out(tokens, &title, &body, data).await)
        })
    }

    fn is_notification_enabled(
        &self,
        user_id: &str,
        notification_type: &str,
    ) -> BoxFuture<'_, bool, BoxedError> {
        let user_id = user_id.to_string();
        let notification_type = notification_type.to_string();

        Box::pin(async move {
            let preference = self
                .push_repo
                .find_preference(&user_id, &notification_type)
                .await
                .map_err(|e| BoxedError::from(e.to_string()))?;

            // No stored preference means the type is enabled.
            Ok(preference.map_or(true, |p| p.enabled))
        })
    }
}
