//! Shared domain models.
//!
//! These structs are the canonical shapes for the entities that move between
//! the repository layer and the feature crates. Dates are plain `YYYY-MM-DD`
//! strings and times-of-day are `HH:MM` strings; the application deliberately
//! never converts dates through time zones, so two records are on the same
//! day exactly when their date strings are equal.

use serde::{Deserialize, Serialize};

/// An application user, created lazily on first verified credential sight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// External subject id from the identity provider.
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_emoji: String,
    pub created_at: Option<String>,
}

/// The authenticated caller, attached to the request by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Group {
    pub id: String,
    pub name: String,
    pub emoji: String,
    /// 8-digit numeric code, unique among all groups.
    pub invite_code: String,
    pub created_by: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GroupMember {
    pub group_id: String,
    pub user_id: String,
    pub joined_at: Option<String>,
}

/// How a user is free on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityKind {
    /// Free the whole day.
    Day,
    /// Free during a set of named slots.
    Slots,
    /// Free between an explicit start and end time.
    Range,
}

impl AvailabilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityKind::Day => "day",
            AvailabilityKind::Slots => "slots",
            AvailabilityKind::Range => "range",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "day" => Some(AvailabilityKind::Day),
            "slots" => Some(AvailabilityKind::Slots),
            "range" => Some(AvailabilityKind::Range),
            _ => None,
        }
    }
}

/// One user's stated free time for one date in one group.
///
/// Unique per (user, group, date): the store upserts on that key, so a user
/// contributes at most one record per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Availability {
    pub id: String,
    pub user_id: String,
    pub group_id: String,
    /// `YYYY-MM-DD` date key.
    pub date: String,
    pub kind: AvailabilityKind,
    /// Named slots; only meaningful when `kind` is [`AvailabilityKind::Slots`].
    #[serde(default)]
    pub slots: Vec<String>,
    /// `HH:MM`; only meaningful when `kind` is [`AvailabilityKind::Range`].
    pub start_time: Option<String>,
    /// `HH:MM`; only meaningful when `kind` is [`AvailabilityKind::Range`].
    pub end_time: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Confirmed,
    /// Terminal; no operation in the current API sets it.
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Confirmed => "confirmed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(EventStatus::Pending),
            "confirmed" => Some(EventStatus::Confirmed),
            "cancelled" => Some(EventStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AttendeeStatus {
    Pending,
    Confirmed,
    Declined,
}

impl AttendeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendeeStatus::Pending => "pending",
            AttendeeStatus::Confirmed => "confirmed",
            AttendeeStatus::Declined => "declined",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(AttendeeStatus::Pending),
            "confirmed" => Some(AttendeeStatus::Confirmed),
            "declined" => Some(AttendeeStatus::Declined),
            _ => None,
        }
    }
}

/// A planned meetup for a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Event {
    pub id: String,
    pub group_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// `YYYY-MM-DD`; never in the past at creation time.
    pub date: String,
    /// `HH:MM`, optional.
    pub time: Option<String>,
    pub status: EventStatus,
    pub created_by: String,
    pub created_at: Option<String>,
}

/// A group member's participation record for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EventAttendee {
    pub event_id: String,
    pub user_id: String,
    pub status: AttendeeStatus,
    pub responded_at: Option<String>,
}

/// A registered push-notification device token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushToken {
    pub user_id: String,
    pub token: String,
    pub platform: String,
}

/// Per-user, per-notification-type opt-out flag. Absence means enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPreference {
    pub user_id: String,
    pub notification_type: String,
    pub enabled: bool,
}
