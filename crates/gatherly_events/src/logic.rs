//! Pure rules of the event state machine.
//!
//! Everything here is deterministic and store-free: validation of new
//! events, the initial attendee set, the status recomputation that runs
//! after every response, and the selection of backfill rows for a member
//! who joined after events were created. The service layer supplies the
//! records and applies the outcomes.

use gatherly_common::models::{AttendeeStatus, Event, EventAttendee, EventStatus};
use gatherly_common::time;
use gatherly_common::{validation_error, GatherlyError};
use serde::{Deserialize, Serialize};

/// Payload for creating an event.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// `YYYY-MM-DD`, today or later.
    pub date: String,
    /// `HH:MM`, optional.
    pub time: Option<String>,
}

/// Payload for responding to an event invitation.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RespondRequest {
    /// `confirmed` or `declined`.
    pub status: String,
}

/// An event together with its attendee records.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EventWithAttendees {
    #[serde(flatten)]
    pub event: Event,
    pub attendees: Vec<EventAttendee>,
}

/// Validate a creation payload against today's date.
///
/// # Errors
///
/// Returns a validation error for an empty title, a malformed date or time,
/// or a date in the past.
pub fn validate_new_event(req: &CreateEventRequest, today: &str) -> Result<(), GatherlyError> {
    if req.title.trim().is_empty() {
        return Err(validation_error("Event title must not be empty"));
    }

    if !time::is_valid_date(&req.date) {
        return Err(validation_error(format!(
            "Invalid event date: {}",
            req.date
        )));
    }

    // Dates are YYYY-MM-DD, so string order is date order.
    if req.date.as_str() < today {
        return Err(validation_error("Event date must not be in the past"));
    }

    if let Some(event_time) = &req.time {
        if !time::is_valid_time(event_time) {
            return Err(validation_error(format!(
                "Invalid event time: {}",
                event_time
            )));
        }
    }

    Ok(())
}

/// Build the initial attendee set for a new event.
///
/// Every current group member gets a row: the creator starts confirmed with
/// `responded_at` set, everyone else starts pending.
pub fn initial_attendees(
    event_id: &str,
    member_ids: &[String],
    creator_id: &str,
    now: &str,
) -> Vec<EventAttendee> {
    member_ids
        .iter()
        .map(|member_id| {
            let is_creator = member_id == creator_id;
            EventAttendee {
                event_id: event_id.to_string(),
                user_id: member_id.clone(),
                status: if is_creator {
                    AttendeeStatus::Confirmed
                } else {
                    AttendeeStatus::Pending
                },
                responded_at: if is_creator {
                    Some(now.to_string())
                } else {
                    None
                },
            }
        })
        .collect()
}

/// Recompute the event status from the full attendee set.
///
/// - every attendee confirmed: the event is confirmed;
/// - any attendee declined: the event is pending, demoting a previously
///   confirmed event;
/// - otherwise the status is left untouched (`None`).
pub fn recompute_status(attendees: &[EventAttendee]) -> Option<EventStatus> {
    if attendees.is_empty() {
        return None;
    }

    if attendees
        .iter()
        .all(|a| a.status == AttendeeStatus::Confirmed)
    {
        return Some(EventStatus::Confirmed);
    }

    if attendees
        .iter()
        .any(|a| a.status == AttendeeStatus::Declined)
    {
        return Some(EventStatus::Pending);
    }

    None
}

/// Select the pending attendee rows a newly joined member should get.
///
/// One row per event with date today-or-later that is not cancelled. The
/// insert is skip-duplicates, so running this again, or concurrently with
/// another join, adds nothing.
pub fn backfill_candidates(events: &[Event], user_id: &str, today: &str) -> Vec<EventAttendee> {
    events
        .iter()
        .filter(|event| event.date.as_str() >= today && event.status != EventStatus::Cancelled)
        .map(|event| EventAttendee {
            event_id: event.id.clone(),
            user_id: user_id.to_string(),
            status: AttendeeStatus::Pending,
            responded_at: None,
        })
        .collect()
}
