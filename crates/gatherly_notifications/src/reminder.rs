//! Hourly reminder sweep for upcoming events.
//!
//! Every hour, events dated today or tomorrow that are not cancelled are
//! swept; each attendee who has not responded yet and has the
//! `event_reminder` preference enabled gets a best-effort push. An atomic
//! flag skips a tick while the previous sweep is still running.

use gatherly_common::models::{AttendeeStatus, EventStatus};
use gatherly_common::time;
use gatherly_common::NotificationDispatcher;
use gatherly_db::EventRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Preference type consulted before sending a reminder.
pub const REMINDER_PREFERENCE: &str = "event_reminder";

const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

pub struct ReminderJob<E>
where
    E: EventRepository,
{
    event_repo: E,
    dispatcher: Arc<dyn NotificationDispatcher>,
    running: AtomicBool,
}

impl<E> ReminderJob<E>
where
    E: EventRepository + Clone + Send + Sync + 'static,
{
    pub fn new(event_repo: E, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            event_repo,
            dispatcher,
            running: AtomicBool::new(false),
        }
    }

    /// Spawn the hourly sweep loop. The handle is only held by the binary;
    /// the task runs for the life of the process.
    pub fn spawn(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                self.run_once().await;
            }
        })
    }

    /// One sweep. Returns how many reminders were dispatched; a sweep that
    /// finds another one still running returns without doing anything.
    pub async fn run_once(&self) -> usize {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Reminder sweep still running, skipping this tick");
            return 0;
        }

        let sent = self.sweep().await;
        self.running.store(false, Ordering::SeqCst);
        sent
    }

    async fn sweep(&self) -> usize {
        let today = time::today_string();
        let tomorrow = time::tomorrow_string();

        let events = match self.event_repo.list_between_dates(&today, &tomorrow).await {
            Ok(events) => events,
            Err(e) => {
                warn!("Reminder sweep could not list events: {}", e);
                return 0;
            }
        };

        let mut sent = 0;

        for event in events {
            if event.status == EventStatus::Cancelled {
                continue;
            }

            let attendees = match self.event_repo.list_attendees(&event.id).await {
                Ok(attendees) => attendees,
                Err(e) => {
                    warn!("Reminder sweep could not list attendees: {}", e);
                    continue;
                }
            };

            for attendee in attendees {
                if attendee.status != AttendeeStatus::Pending {
                    continue;
                }

                let enabled = self
                    .dispatcher
                    .is_notification_enabled(&attendee.user_id, REMINDER_PREFERENCE)
                    .await
                    .unwrap_or(true);
                if !enabled {
                    continue;
                }

                let when = if event.date == today { "today" } else { "tomorrow" };
                let mut data = HashMap::new();
                data.insert("type".to_string(), "event_reminder".to_string());
                data.insert("event_id".to_string(), event.id.clone());
                data.insert("group_id".to_string(), event.group_id.clone());

                match self
                    .dispatcher
                    .send_to_user(
                        &attendee.user_id,
                        "Event reminder",
                        &format!("\"{}\" is {}. Are you in?", event.title, when),
                        Some(data),
                    )
                    .await
                {
                    Ok(_) => sent += 1,
                    Err(e) => {
                        warn!(
                            "Reminder to user {} failed: {}",
                            attendee.user_id, e
                        );
                    }
                }
            }
        }

        if sent > 0 {
            info!("Reminder sweep dispatched {} reminders", sent);
        }
        sent
    }
}
