//! In-memory repositories for service tests.

use gatherly_common::models::{
    AttendeeStatus, Event, EventAttendee, EventStatus, Group, GroupMember, User,
};
use gatherly_db::error::DbError;
use gatherly_db::{EventRepository, GroupRepository};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct InMemoryGroupRepo {
    pub groups: Arc<Mutex<Vec<Group>>>,
    pub members: Arc<Mutex<Vec<GroupMember>>>,
    pub users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryGroupRepo {
    pub fn with_members(group_id: &str, member_ids: &[&str]) -> Self {
        let repo = Self::default();
        let mut members = repo.members.lock().unwrap();
        for member_id in member_ids {
            members.push(GroupMember {
                group_id: group_id.to_string(),
                user_id: member_id.to_string(),
                joined_at: None,
            });
        }
        drop(members);
        repo
    }
}

impl GroupRepository for InMemoryGroupRepo {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn create_group(&self, group: Group) -> Result<Group, DbError> {
        self.members.lock().unwrap().push(GroupMember {
            group_id: group.id.clone(),
            user_id: group.created_by.clone(),
            joined_at: group.created_at.clone(),
        });
        self.groups.lock().unwrap().push(group.clone());
        Ok(group)
    }

    async fn find_by_id(&self, group_id: &str) -> Result<Option<Group>, DbError> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == group_id)
            .cloned())
    }

    async fn find_by_invite_code(&self, invite_code: &str) -> Result<Option<Group>, DbError> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.invite_code == invite_code)
            .cloned())
    }

    async fn invite_code_exists(&self, invite_code: &str) -> Result<bool, DbError> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .any(|g| g.invite_code == invite_code))
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Group>, DbError> {
        let members = self.members.lock().unwrap();
        let groups = self.groups.lock().unwrap();
        Ok(groups
            .iter()
            .filter(|g| {
                members
                    .iter()
                    .any(|m| m.group_id == g.id && m.user_id == user_id)
            })
            .cloned()
            .collect())
    }

    async fn update_invite_code(&self, group_id: &str, invite_code: &str) -> Result<(), DbError> {
        let mut groups = self.groups.lock().unwrap();
        let group = groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| DbError::NotFound(format!("Group not found: {}", group_id)))?;
        group.invite_code = invite_code.to_string();
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
            joined_at: Some("2026-01-01T00:00:00Z".to_string()),
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

    async fn list_member_users(&self, group_id: &str) -> Result<Vec<User>, DbError> {
        let members = self.members.lock().unwrap();
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| {
                members
                    .iter()
                    .any(|m| m.group_id == group_id && m.user_id == u.id)
            })
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryEventRepo {
    pub events: Arc<Mutex<Vec<Event>>>,
    pub attendees: Arc<Mutex<Vec<EventAttendee>>>,
}

impl EventRepository for InMemoryEventRepo {
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
        let mut events: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }

    async fn list_from_date(&self, group_id: &str, from_date: &str) -> Result<Vec<Event>, DbError> {
        let mut events: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.group_id == group_id && e.date.as_str() >= from_date)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }

    async fn list_between_dates(&self, from_date: &str, to_date: &str) -> Result<Vec<Event>, DbError> {
        let mut events: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.date.as_str() >= from_date && e.date.as_str() <= to_date)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
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
