//! In-memory repositories and a recording sender for the tests.

use crate::sender::{PushSendError, PushSender};
use gatherly_common::models::{
    AttendeeStatus, Event, EventAttendee, EventStatus, Group, GroupMember, NotificationPreference,
    PushToken, User,
};
use gatherly_common::{BoxFuture, BoxedError, NotificationDispatcher, SendOutcome};
use gatherly_db::error::DbError;
use gatherly_db::{EventRepository, GroupRepository, PushRepository};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// A sender that records every delivery and can be told to reject tokens.
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(String, String, String)>>,
    /// Tokens answered with [`PushSendError::InvalidToken`].
    pub invalid_tokens: Mutex<HashSet<String>>,
    /// Tokens answered with [`PushSendError::Failed`].
    pub failing_tokens: Mutex<HashSet<String>>,
}

impl RecordingSender {
    pub fn sent_tokens(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(token, _, _)| token.clone())
            .collect()
    }

    pub fn mark_invalid(&self, token: &str) {
        self.invalid_tokens.lock().unwrap().insert(token.to_string());
    }

    pub fn mark_failing(&self, token: &str) {
        self.failing_tokens.lock().unwrap().insert(token.to_string());
    }
}

impl PushSender for RecordingSender {
    fn send(
        &self,
        token: &str,
        title: &str,
        body: &str,
        _data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, (), PushSendError> {
        let token = token.to_string();
        let title = title.to_string();
        let body = body.to_string();

        Box::pin(async move {
            if self.invalid_tokens.lock().unwrap().contains(&token) {
                return Err(PushSendError::InvalidToken);
            }
            if self.failing_tokens.lock().unwrap().contains(&token) {
                return Err(PushSendError::Failed("stubbed failure".to_string()));
            }
            self.sent.lock().unwrap().push((token, title, body));
            Ok(())
        })
    }
}

#[derive(Clone, Default)]
pub struct MemPushRepo {
    pub tokens: Arc<Mutex<Vec<PushToken>>>,
    pub preferences: Arc<Mutex<Vec<NotificationPreference>>>,
}

impl MemPushRepo {
    pub fn with_token(self, user_id: &str, token: &str) -> Self {
        self.tokens.lock().unwrap().push(PushToken {
            user_id: user_id.to_string(),
            token: token.to_string(),
            platform: "ios".to_string(),
        });
        self
    }
}

impl PushRepository for MemPushRepo {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn upsert_token(&self, token: PushToken) -> Result<(), DbError> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.retain(|t| t.token != token.token);
        tokens.push(token);
        Ok(())
    }

    async fn delete_token(&self, user_id: &str, token: &str) -> Result<bool, DbError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| !(t.user_id == user_id && t.token == token));
        Ok(tokens.len() < before)
    }

    async fn delete_token_value(&self, token: &str) -> Result<(), DbError> {
        self.tokens.lock().unwrap().retain(|t| t.token != token);
        Ok(())
    }

    async fn list_tokens_for_user(&self, user_id: &str) -> Result<Vec<PushToken>, DbError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_tokens_for_users(&self, user_ids: &[String]) -> Result<Vec<PushToken>, DbError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| user_ids.contains(&t.user_id))
            .cloned()
            .collect())
    }

    async fn upsert_preference(&self, preference: NotificationPreference) -> Result<(), DbError> {
        let mut preferences = self.preferences.lock().unwrap();
        preferences.retain(|p| {
            !(p.user_id == preference.user_id
                && p.notification_type == preference.notification_type)
        });
        preferences.push(preference);
        Ok(())
    }

    async fn find_preference(
        &self,
        user_id: &str,
        notification_type: &str,
    ) -> Result<Option<NotificationPreference>, DbError> {
        Ok(self
            .preferences
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id && p.notification_type == notification_type)
            .cloned())
    }
}

#[derive(Clone, Default)]
pub struct MemGroupRepo {
    pub members: Arc<Mutex<Vec<GroupMember>>>,
}

impl MemGroupRepo {
    pub fn with_members(group_id: &str, member_ids: &[&str]) -> Self {
        let repo = Self::default();
        {
            let mut members = repo.members.lock().unwrap();
            for member_id in member_ids {
                members.push(GroupMember {
                    group_id: group_id.to_string(),
                    user_id: member_id.to_string(),
                    joined_at: None,
                });
            }
        }
        repo
    }
}

impl GroupRepository for MemGroupRepo {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn create_group(&self, group: Group) -> Result<Group, DbError> {
        Ok(group)
    }

    async fn find_by_id(&self, _group_id: &str) -> Result<Option<Group>, DbError> {
        Ok(None)
    }

    async fn find_by_invite_code(&self, _invite_code: &str) -> Result<Option<Group>, DbError> {
        Ok(None)
    }

    async fn invite_code_exists(&self, _invite_code: &str) -> Result<bool, DbError> {
        Ok(false)
    }

    async fn list_for_user(&self, _user_id: &str) -> Result<Vec<Group>, DbError> {
        Ok(Vec::new())
    }

    async fn update_invite_code(&self, _group_id: &str, _invite_code: &str) -> Result<(), DbError> {
        Ok(())
    }

    async fn find_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Option<GroupMember>, DbError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.group_id == group_id && m.user_id == user_id)
            .cloned())
    }

    async fn create_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<GroupMember, DbError> {
        let member = GroupMember {
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
            joined_at: None,
        };
        self.members.lock().unwrap().push(member.clone());
        Ok(member)
    }

    async fn delete_membership(&self, group_id: &str, user_id: &str) -> Result<bool, DbError> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| !(m.group_id == group_id && m.user_id == user_id));
        Ok(members.len() < before)
    }

    async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMember>, DbError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn list_member_users(&self, _group_id: &str) -> Result<Vec<User>, DbError> {
        Ok(Vec::new())
    }
}

#[derive(Clone, Default)]
pub struct MemEventRepo {
    pub events: Arc<Mutex<Vec<Event>>>,
    pub attendees: Arc<Mutex<Vec<EventAttendee>>>,
}

impl MemEventRepo {
    pub fn with_event(self, event: Event, attendees: Vec<EventAttendee>) -> Self {
        self.events.lock().unwrap().push(event);
        self.attendees.lock().unwrap().extend(attendees);
        self
    }
}

impl EventRepository for MemEventRepo {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn create_with_attendees(
        &self,
        event: Event,
        attendees: Vec<EventAttendee>,
    ) -> Result<Event, DbError> {
        self.events.lock().unwrap().push(event.clone());
        self.attendees.lock().unwrap().extend(attendees);
        Ok(event)
    }

    async fn find_by_id(&self, event_id: &str) -> Result<Option<Event>, DbError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == event_id)
            .cloned())
    }

    async fn list_by_group(&self, group_id: &str) -> Result<Vec<Event>, DbError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn list_from_date(&self, group_id: &str, from_date: &str) -> Result<Vec<Event>, DbError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.group_id == group_id && e.date.as_str() >= from_date)
            .cloned()
            .collect())
    }

    async fn list_between_dates(
        &self,
        from_date: &str,
        to_date: &str,
    ) -> Result<Vec<Event>, DbError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.date.as_str() >= from_date && e.date.as_str() <= to_date)
            .cloned()
            .collect())
    }

    async fn update_status(&self, event_id: &str, status: EventStatus) -> Result<(), DbError> {
        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| DbError::NotFound(format!("Event not found: {}", event_id)))?;
        event.status = status;
        Ok(())
    }

    async fn find_attendee(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<EventAttendee>, DbError> {
        Ok(self
            .attendees
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.event_id == event_id && a.user_id == user_id)
            .cloned())
    }

    async fn list_attendees(&self, event_id: &str) -> Result<Vec<EventAttendee>, DbError> {
        Ok(self
            .attendees
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn update_attendee_status(
        &self,
        event_id: &str,
        user_id: &str,
        status: AttendeeStatus,
        responded_at: &str,
    ) -> Result<(), DbError> {
        let mut attendees = self.attendees.lock().unwrap();
        let attendee = attendees
            .iter_mut()
            .find(|a| a.event_id == event_id && a.user_id == user_id)
            .ok_or_else(|| DbError::NotFound("Attendee not found".to_string()))?;
        attendee.status = status;
        attendee.responded_at = Some(responded_at.to_string());
        Ok(())
    }

    async fn create_attendees_skip_duplicates(
        &self,
        attendees: Vec<EventAttendee>,
    ) -> Result<u64, DbError> {
        let mut existing = self.attendees.lock().unwrap();
        let mut inserted = 0;
        for attendee in attendees {
            let duplicate = existing
                .iter()
                .any(|a| a.event_id == attendee.event_id && a.user_id == attendee.user_id);
            if !duplicate {
                existing.push(attendee);
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

/// A dispatcher that records per-user sends, for the reminder tests.
#[derive(Default)]
pub struct RecordingDispatcher {
    pub reminded: Mutex<Vec<(String, String)>>,
    pub disabled: Mutex<HashSet<(String, String)>>,
}

impl RecordingDispatcher {
    pub fn disable(&self, user_id: &str, notification_type: &str) {
        self.disabled
            .lock()
            .unwrap()
            .insert((user_id.to_string(), notification_type.to_string()));
    }

    pub fn reminded_users(&self) -> Vec<String> {
        self.reminded
            .lock()
            .unwrap()
            .iter()
            .map(|(user_id, _)| user_id.clone())
            .collect()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn send_to_user(
        &self,
        user_id: &str,
        _title: &str,
        body: &str,
        _data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, SendOutcome, BoxedError> {
        let user_id = user_id.to_string();
        let body = body.to_string();
        Box::pin(async move {
            self.reminded.lock().unwrap().push((user_id, body));
            Ok(SendOutcome { sent: 1 })
        })
    }

    fn send_to_group(
        &self,
        _group_id: &str,
        _title: &str,
        _body: &str,
        _exclude_user_id: Option<&str>,
        _data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, SendOutcome, BoxedError> {
        Box::pin(async move { Ok(SendOutcome::default()) })
    }

    fn is_notification_enabled(
        &self,
        user_id: &str,
        notification_type: &str,
    ) -> BoxFuture<'_, bool, BoxedError> {
        let key = (user_id.to_string(), notification_type.to_string());
        Box::pin(async move { Ok(!self.disabled.lock().unwrap().contains(&key)) })
    }
}
