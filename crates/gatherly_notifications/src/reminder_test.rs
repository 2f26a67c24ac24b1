use crate::reminder::ReminderJob;
use crate::test_support::{MemEventRepo, RecordingDispatcher};
use gatherly_common::models::{AttendeeStatus, Event, EventAttendee, EventStatus};
use gatherly_common::time::{today_string, tomorrow_string};
use gatherly_common::{BoxFuture, BoxedError, NotificationDispatcher, SendOutcome};
use std::collections::HashMap;
use std::sync::Arc;

fn event(id: &str, date: &str, status: EventStatus) -> Event {
    Event {
        id: id.to_string(),
        group_id: "g1".to_string(),
        title: format!("Event {}", id),
        description: None,
        location: None,
        date: date.to_string(),
        time: None,
        status,
        created_by: "alice".to_string(),
        created_at: None,
    }
}

fn attendee(event_id: &str, user_id: &str, status: AttendeeStatus) -> EventAttendee {
    EventAttendee {
        event_id: event_id.to_string(),
        user_id: user_id.to_string(),
        status,
        responded_at: None,
    }
}

#[tokio::test]
async fn reminds_pending_attendees_of_events_within_a_day() {
    let repo = MemEventRepo::default()
        .with_event(
            event("e1", &today_string(), EventStatus::Pending),
            vec![
                attendee("e1", "alice", AttendeeStatus::Pending),
                attendee("e1", "bob", AttendeeStatus::Confirmed),
            ],
        )
        .with_event(
            event("e2", &tomorrow_string(), EventStatus::Pending),
            vec![attendee("e2", "carol", AttendeeStatus::Pending)],
        );
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let job = ReminderJob::new(repo, dispatcher.clone());

    let sent = job.run_once().await;

    assert_eq!(sent, 2);
    let mut reminded = dispatcher.reminded_users();
    reminded.sort();
    assert_eq!(reminded, vec!["alice", "carol"]);
}

#[tokio::test]
async fn confirmed_events_still_nudge_their_pending_attendees() {
    let repo = MemEventRepo::default().with_event(
        event("e1", &today_string(), EventStatus::Confirmed),
        vec![attendee("e1", "alice", AttendeeStatus::Pending)],
    );
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let job = ReminderJob::new(repo, dispatcher.clone());

    assert_eq!(job.run_once().await, 1);
}

#[tokio::test]
async fn cancelled_events_are_skipped() {
    let repo = MemEventRepo::default().with_event(
        event("e1", &today_string(), EventStatus::Cancelled),
        vec![attendee("e1", "alice", AttendeeStatus::Pending)],
    );
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let job = ReminderJob::new(repo, dispatcher.clone());

    assert_eq!(job.run_once().await, 0);
    assert!(dispatcher.reminded_users().is_empty());
}

#[tokio::test]
async fn far_off_events_are_outside_the_sweep_window() {
    let repo = MemEventRepo::default().with_event(
        event("e1", "2099-06-01", EventStatus::Pending),
        vec![attendee("e1", "alice", AttendeeStatus::Pending)],
    );
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let job = ReminderJob::new(repo, dispatcher.clone());

    assert_eq!(job.run_once().await, 0);
}

#[tokio::test]
async fn opted_out_users_are_not_reminded() {
    let repo = MemEventRepo::default().with_event(
        event("e1", &today_string(), EventStatus::Pending),
        vec![
            attendee("e1", "alice", AttendeeStatus::Pending),
            attendee("e1", "bob", AttendeeStatus::Pending),
        ],
    );
    let dispatcher = Arc::new(RecordingDispatcher::default());
    dispatcher.disable("alice", "event_reminder");
    let job = ReminderJob::new(repo, dispatcher.clone());

    assert_eq!(job.run_once().await, 1);
    assert_eq!(dispatcher.reminded_users(), vec!["bob"]);
}

/// Blocks inside `send_to_user` until released, so a sweep can be held open.
struct GatedDispatcher {
    gate: tokio::sync::Semaphore,
}

impl NotificationDispatcher for GatedDispatcher {
    fn send_to_user(
        &self,
        _user_id: &str,
        _title: &str,
        _body: &str,
        _data: Option<HashMap<String, String>>,
    ) -> BoxFuture<'_, SendOutcome, BoxedError> {
        Box::pin(async move {
            let _permit = self.gate.acquire().await.map_err(|e| e.to_string())?;
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
        _user_id: &str,
        _notification_type: &str,
    ) -> BoxFuture<'_, bool, BoxedError> {
        Box::pin(async move { Ok(true) })
    }
}

#[tokio::test]
async fn an_overlapping_sweep_is_skipped() {
    let repo = MemEventRepo::default().with_event(
        event("e1", &today_string(), EventStatus::Pending),
        vec![attendee("e1", "alice", AttendeeStatus::Pending)],
    );
    let dispatcher = Arc::new(GatedDispatcher {
        gate: tokio::sync::Semaphore::new(0),
    });
    let job = Arc::new(ReminderJob::new(repo, dispatcher.clone()));

    let held = {
        let job = job.clone();
        tokio::spawn(async move { job.run_once().await })
    };
    tokio::task::yield_now().await;

    // The first sweep is parked on the gate; this tick must bail out.
    assert_eq!(job.run_once().await, 0);

    dispatcher.gate.add_permits(1);
    assert_eq!(held.await.unwrap(), 1);

    // With the flag cleared, the next sweep runs again.
    dispatcher.gate.add_permits(1);
    assert_eq!(job.run_once().await, 1);
}
