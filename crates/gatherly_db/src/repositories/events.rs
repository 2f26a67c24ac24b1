//! Repository for events and their attendee records
//!
//! An event is created together with one attendee row per group member in a
//! single transaction. Attendee rows are unique per `(event_id, user_id)`,
//! and the skip-duplicates insert relies on that constraint so backfilling a
//! new member never disturbs existing responses.

use crate::error::DbError;

pub use gatherly_common::models::{AttendeeStatus, Event, EventAttendee, EventStatus};

/// Repository for events and their attendee records
pub trait EventRepository {
    /// Initialize the database schema for events and attendees
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert an event and its initial attendee rows in one transaction
    fn create_with_attendees(
        &self,
        event: Event,
        attendees: Vec<EventAttendee>,
    ) -> impl std::future::Future<Output = Result<Event, DbError>> + Send;

    /// Find an event by id
    fn find_by_id(
        &self,
        event_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Event>, DbError>> + Send;

    /// List every event in a group, ordered by date
    fn list_by_group(
        &self,
        group_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Event>, DbError>> + Send;

    /// List a group's events on or after the given date, ordered by date
    fn list_from_date(
        &self,
        group_id: &str,
        from_date: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Event>, DbError>> + Send;

    /// List all events whose date falls in the inclusive range
    fn list_between_dates(
        &self,
        from_date: &str,
        to_date: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Event>, DbError>> + Send;

    /// Replace an event's status
    fn update_status(
        &self,
        event_id: &str,
        status: EventStatus,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find one attendee row
    fn find_attendee(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<EventAttendee>, DbError>> + Send;

    /// List an event's attendee rows
    fn list_attendees(
        &self,
        event_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<EventAttendee>, DbError>> + Send;

    /// Record one attendee's response and its timestamp
    fn update_attendee_status(
        &self,
        event_id: &str,
        user_id: &str,
        status: AttendeeStatus,
        responded_at: &str,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert attendee rows, silently skipping any that already exist
    ///
    /// # Returns
    ///
    /// The number of rows actually inserted.
    fn create_attendees_skip_duplicates(
        &self,
        attendees: Vec<EventAttendee>,
    ) -> impl std::future::Future<Output = Result<u64, DbError>> + Send;
}
