//! Event service: membership-scoped reads and the create/respond flows.

use crate::logic::{
    backfill_candidates, initial_attendees, recompute_status, validate_new_event,
    CreateEventRequest, EventWithAttendees,
};
use gatherly_common::models::{AttendeeStatus, CurrentUser, Event, EventStatus};
use gatherly_common::services::notify_group_detached;
use gatherly_common::time;
use gatherly_common::{not_found, validation_error, GatherlyError, NotificationDispatcher};
use gatherly_db::{EventRepository, GroupRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Event service over the group and event repositories.
///
/// The dispatcher is optional; with push disabled the state machine runs
/// identically and the notification calls are no-ops.
#[derive(Clone)]
pub struct EventsService<G, E>
where
    G: GroupRepository,
    E: EventRepository,
{
    group_repo: G,
    event_repo: E,
    notifier: Option<Arc<dyn NotificationDispatcher>>,
}

impl<G, E> EventsService<G, E>
where
    G: GroupRepository,
    E: EventRepository,
{
    pub fn new(
        group_repo: G,
        event_repo: E,
        notifier: Option<Arc<dyn NotificationDispatcher>>,
    ) -> Self {
        Self {
            group_repo,
            event_repo,
            notifier,
        }
    }

    /// Require the caller's membership; a non-member sees the group as 404.
    async fn require_membership(&self, group_id: &str, user_id: &str) -> Result<(), GatherlyError> {
        let membership = self.group_repo.find_membership(group_id, user_id).await?;
        if membership.is_none() {
            return Err(not_found(format!("Group not found: {}", group_id)));
        }
        Ok(())
    }

    /// Create an event with one attendee row per current group member, all
    /// in one transaction. The creator starts confirmed, everyone else
    /// pending, and the group is notified best-effort (creator excluded).
    pub async fn create_event(
        &self,
        user: &CurrentUser,
        group_id: &str,
        req: CreateEventRequest,
    ) -> Result<EventWithAttendees, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;

        let today = time::today_string();
        validate_new_event(&req, &today)?;

        let members = self.group_repo.list_members(group_id).await?;
        let member_ids: Vec<String> = members.into_iter().map(|m| m.user_id).collect();

        let now = chrono::Utc::now().to_rfc3339();
        let event = Event {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            title: req.title.trim().to_string(),
            description: req.description.clone(),
            location: req.location.clone(),
            date: req.date.clone(),
            time: req.time.clone(),
            status: EventStatus::Pending,
            created_by: user.id.clone(),
            created_at: Some(now.clone()),
        };

        let attendees = initial_attendees(&event.id, &member_ids, &user.id, &now);
        let event = self
            .event_repo
            .create_with_attendees(event, attendees.clone())
            .await?;

        info!(
            "Event '{}' created in group {} with {} attendees",
            event.title,
            group_id,
            attendees.len()
        );

        let mut data = HashMap::new();
        data.insert("type".to_string(), "new_event".to_string());
        data.insert("event_id".to_string(), event.id.clone());
        data.insert("group_id".to_string(), group_id.to_string());
        notify_group_detached(
            &self.notifier,
            group_id,
            "New event",
            &format!("{} planned \"{}\" on {}", user.name, event.title, event.date),
            Some(&user.id),
            Some(data),
        );

        Ok(EventWithAttendees { event, attendees })
    }

    /// Record the caller's response and recompute the event status.
    ///
    /// All confirmed promotes the event to confirmed (with a group
    /// notification, nobody excluded); any decline demotes it to pending;
    /// otherwise the status stays as it is.
    pub async fn respond(
        &self,
        user: &CurrentUser,
        group_id: &str,
        event_id: &str,
        status_value: &str,
    ) -> Result<EventWithAttendees, GatherlyError> {
        let status = AttendeeStatus::parse(status_value)
            .ok_or_else(|| validation_error(format!("Invalid response status: {}", status_value)))?;
        if status == AttendeeStatus::Pending {
            return Err(validation_error(
                "Response status must be confirmed or declined",
            ));
        }

        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .filter(|event| event.group_id == group_id)
            .ok_or_else(|| not_found(format!("Event not found: {}", event_id)))?;

        self.event_repo
            .find_attendee(event_id, &user.id)
            .await?
            .ok_or_else(|| not_found("You are not invited to this event"))?;

        let now = chrono::Utc::now().to_rfc3339();
        self.event_repo
            .update_attendee_status(event_id, &user.id, status, &now)
            .await?;

        let attendees = self.event_repo.list_attendees(event_id).await?;
        let mut current_status = event.status;

        if let Some(new_status) = recompute_status(&attendees) {
            if new_status != current_status {
                self.event_repo.update_status(event_id, new_status).await?;
                debug!(
                    "Event {} status changed {} -> {}",
                    event_id,
                    current_status.as_str(),
                    new_status.as_str()
                );

                if new_status == EventStatus::Confirmed {
                    let mut data = HashMap::new();
                    data.insert("type".to_string(), "event_confirmed".to_string());
                    data.insert("event_id".to_string(), event_id.to_string());
                    data.insert("group_id".to_string(), group_id.to_string());
                    notify_group_detached(
                        &self.notifier,
                        group_id,
                        "Event confirmed",
                        &format!("\"{}\" on {} is happening!", event.title, event.date),
                        None,
                        Some(data),
                    );
                }

                current_status = new_status;
            }
        }

        Ok(EventWithAttendees {
            event: Event {
                status: current_status,
                ..event
            },
            attendees,
        })
    }

    /// List a group's events with their attendee sets, ordered by date.
    pub async fn list_events(
        &self,
        user: &CurrentUser,
        group_id: &str,
    ) -> Result<Vec<EventWithAttendees>, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;

        let events = self.event_repo.list_by_group(group_id).await?;
        let mut result = Vec::with_capacity(events.len());
        for event in events {
            let attendees = self.event_repo.list_attendees(&event.id).await?;
            result.push(EventWithAttendees { event, attendees });
        }

        Ok(result)
    }

    /// Fetch one event with its attendee set.
    pub async fn get_event(
        &self,
        user: &CurrentUser,
        group_id: &str,
        event_id: &str,
    ) -> Result<EventWithAttendees, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;

        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .filter(|event| event.group_id == group_id)
            .ok_or_else(|| not_found(format!("Event not found: {}", event_id)))?;

        let attendees = self.event_repo.list_attendees(&event.id).await?;
        Ok(EventWithAttendees { event, attendees })
    }

    /// Give a newly joined member a pending attendee row on every upcoming
    /// non-cancelled event in the group. Idempotent.
    pub async fn backfill_for_member(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<u64, GatherlyError> {
        let today = time::today_string();
        let events = self.event_repo.list_from_date(group_id, &today).await?;
        let rows = backfill_candidates(&events, user_id, &today);

        if rows.is_empty() {
            return Ok(0);
        }

        let inserted = self.event_repo.create_attendees_skip_duplicates(rows).await?;
        debug!(
            "Backfilled {} attendee rows for user {} in group {}",
            inserted, user_id, group_id
        );
        Ok(inserted)
    }
}
