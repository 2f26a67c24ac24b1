//! Group service: creation, membership, and invite codes.

use crate::logic::{
    join_url, random_invite_code, validate_new_group, CreateGroupRequest, InviteInfo,
    MAX_GENERATION_ATTEMPTS,
};
use gatherly_common::models::{CurrentUser, Group, User};
use gatherly_common::services::notify_group_detached;
use gatherly_common::{conflict, exhausted, not_found, GatherlyError, NotificationDispatcher};
use gatherly_config::InviteConfig;
use gatherly_db::{EventRepository, GroupRepository};
use gatherly_events::EventsService;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Group service over the group and event repositories.
///
/// Event access is needed for the attendee backfill that runs when someone
/// joins a group that already has upcoming events.
#[derive(Clone)]
pub struct GroupsService<G, E>
where
    G: GroupRepository,
    E: EventRepository,
{
    group_repo: G,
    events: EventsService<G, E>,
    notifier: Option<Arc<dyn NotificationDispatcher>>,
    invite: InviteConfig,
}

impl<G, E> GroupsService<G, E>
where
    G: GroupRepository + Clone,
    E: EventRepository,
{
    pub fn new(
        group_repo: G,
        event_repo: E,
        notifier: Option<Arc<dyn NotificationDispatcher>>,
        invite: InviteConfig,
    ) -> Self {
        // The backfill path never notifies, so the inner service gets no
        // dispatcher.
        let events = EventsService::new(group_repo.clone(), event_repo, None);
        Self {
            group_repo,
            events,
            notifier,
            invite,
        }
    }

    async fn require_membership(&self, group_id: &str, user_id: &str) -> Result<(), GatherlyError> {
        let membership = self.group_repo.find_membership(group_id, user_id).await?;
        if membership.is_none() {
            return Err(not_found(format!("Group not found: {}", group_id)));
        }
        Ok(())
    }

    /// Draw invite codes until one is free, within the bounded retry budget.
    async fn generate_unique_code(&self) -> Result<String, GatherlyError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = {
                let mut rng = rand::thread_rng();
                random_invite_code(&mut rng)
            };

            if !self.group_repo.invite_code_exists(&code).await? {
                return Ok(code);
            }
            warn!(
                "Invite code collision on attempt {}/{}",
                attempt, MAX_GENERATION_ATTEMPTS
            );
        }

        Err(exhausted(format!(
            "Could not generate a unique invite code in {} attempts",
            MAX_GENERATION_ATTEMPTS
        )))
    }

    /// Create a group with a fresh invite code; the creator becomes the
    /// first member in the same transaction.
    pub async fn create_group(
        &self,
        user: &CurrentUser,
        req: CreateGroupRequest,
    ) -> Result<Group, GatherlyError> {
        let (name, emoji) = validate_new_group(&req)?;
        let invite_code = self.generate_unique_code().await?;

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            emoji,
            invite_code,
            created_by: user.id.clone(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        let group = self.group_repo.create_group(group).await?;
        info!("Group '{}' created by {}", group.name, user.id);
        Ok(group)
    }

    /// List the caller's groups.
    pub async fn list_groups(&self, user: &CurrentUser) -> Result<Vec<Group>, GatherlyError> {
        Ok(self.group_repo.list_for_user(&user.id).await?)
    }

    /// Fetch one group; non-members see it as 404.
    pub async fn get_group(
        &self,
        user: &CurrentUser,
        group_id: &str,
    ) -> Result<Group, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;
        self.group_repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| not_found(format!("Group not found: {}", group_id)))
    }

    /// List a group's member users.
    pub async fn members(
        &self,
        user: &CurrentUser,
        group_id: &str,
    ) -> Result<Vec<User>, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;
        Ok(self.group_repo.list_member_users(group_id).await?)
    }

    /// Join a group by invite code.
    ///
    /// The new member is backfilled onto every upcoming non-cancelled event,
    /// and the rest of the group gets a best-effort notification.
    pub async fn join_by_code(
        &self,
        user: &CurrentUser,
        invite_code: &str,
    ) -> Result<Group, GatherlyError> {
        let group = self
            .group_repo
            .find_by_invite_code(invite_code.trim())
            .await?
            .ok_or_else(|| not_found("Invalid invite code"))?;

        let existing = self.group_repo.find_membership(&group.id, &user.id).await?;
        if existing.is_some() {
            return Err(conflict("You are already a member of this group"));
        }

        self.group_repo.create_membership(&group.id, &user.id).await?;
        self.events.backfill_for_member(&group.id, &user.id).await?;

        info!("User {} joined group {}", user.id, group.id);

        let mut data = HashMap::new();
        data.insert("type".to_string(), "member_joined".to_string());
        data.insert("group_id".to_string(), group.id.clone());
        notify_group_detached(
            &self.notifier,
            &group.id,
            &group.name,
            &format!("{} joined the group", user.name),
            Some(&user.id),
            Some(data),
        );

        Ok(group)
    }

    /// Leave a group. Attendee rows on upcoming events are left in place.
    pub async fn leave(&self, user: &CurrentUser, group_id: &str) -> Result<(), GatherlyError> {
        let group = self
            .group_repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| not_found(format!("Group not found: {}", group_id)))?;

        let removed = self.group_repo.delete_membership(group_id, &user.id).await?;
        if !removed {
            return Err(not_found("You are not a member of this group"));
        }

        info!("User {} left group {}", user.id, group_id);

        let mut data = HashMap::new();
        data.insert("type".to_string(), "member_left".to_string());
        data.insert("group_id".to_string(), group_id.to_string());
        notify_group_detached(
            &self.notifier,
            group_id,
            &group.name,
            &format!("{} left the group", user.name),
            Some(&user.id),
            Some(data),
        );

        Ok(())
    }

    /// The group's invite code and shareable link.
    pub async fn invite_info(
        &self,
        user: &CurrentUser,
        group_id: &str,
    ) -> Result<InviteInfo, GatherlyError> {
        let group = self.get_group(user, group_id).await?;
        Ok(InviteInfo {
            join_url: join_url(&self.invite.join_url_base, &group.invite_code),
            invite_code: group.invite_code,
        })
    }

    /// Replace the group's invite code with a freshly generated one,
    /// invalidating the old link.
    pub async fn regenerate_code(
        &self,
        user: &CurrentUser,
        group_id: &str,
    ) -> Result<InviteInfo, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;

        let code = self.generate_unique_code().await?;
        self.group_repo.update_invite_code(group_id, &code).await?;

        info!("Invite code regenerated for group {}", group_id);

        Ok(InviteInfo {
            join_url: join_url(&self.invite.join_url_base, &code),
            invite_code: code,
        })
    }
}
