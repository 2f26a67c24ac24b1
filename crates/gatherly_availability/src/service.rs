//! Availability service: record CRUD and the per-group summary.

use crate::logic::{group_by_date, recommend_day, suggest_time, DayRecommendation, TimeSuggestion};
use gatherly_common::models::{Availability, AvailabilityKind, CurrentUser};
use gatherly_common::time;
use gatherly_common::{not_found, validation_error, GatherlyError};
use gatherly_db::{AvailabilityRepository, GroupRepository};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Records may carry at most this many named slots.
pub const MAX_SLOTS: usize = 10;

/// Payload for creating or overwriting a record. The store key is
/// (caller, group, date), so posting the same date twice replaces the
/// earlier record.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpsertAvailabilityRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub kind: AvailabilityKind,
    #[serde(default)]
    pub slots: Vec<String>,
    /// `HH:MM`; required when `kind` is `range`.
    pub start_time: Option<String>,
    /// `HH:MM`; required when `kind` is `range`.
    pub end_time: Option<String>,
}

/// Payload for updating an existing record in place. The date is part of
/// the record's identity and cannot change.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateAvailabilityRequest {
    pub kind: AvailabilityKind,
    #[serde(default)]
    pub slots: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// One date in the summary.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DaySummary {
    pub date: String,
    pub available_count: usize,
    pub user_ids: Vec<String>,
}

/// The per-group availability summary.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailabilitySummary {
    pub days: Vec<DaySummary>,
    pub recommendation: Option<DayRecommendation>,
    /// Only present when the caller asked about a specific date.
    pub suggestion: Option<TimeSuggestion>,
}

fn validate_fields(
    kind: AvailabilityKind,
    slots: &[String],
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<(), GatherlyError> {
    if slots.len() > MAX_SLOTS {
        return Err(validation_error(format!(
            "At most {} slots are allowed",
            MAX_SLOTS
        )));
    }

    for value in [start_time, end_time].into_iter().flatten() {
        if !time::is_valid_time(value) {
            return Err(validation_error(format!("Invalid time: {}", value)));
        }
    }

    match kind {
        AvailabilityKind::Slots if slots.is_empty() => {
            Err(validation_error("Slots availability needs at least one slot"))
        }
        AvailabilityKind::Range if start_time.is_none() || end_time.is_none() => Err(
            validation_error("Range availability needs a start and end time"),
        ),
        AvailabilityKind::Range => {
            // Both validated above; HH:MM compares lexicographically.
            if start_time >= end_time {
                return Err(validation_error("Start time must be before end time"));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Availability service over the group and availability repositories.
#[derive(Clone)]
pub struct AvailabilityService<G, A>
where
    G: GroupRepository,
    A: AvailabilityRepository,
{
    group_repo: G,
    availability_repo: A,
}

impl<G, A> AvailabilityService<G, A>
where
    G: GroupRepository,
    A: AvailabilityRepository,
{
    pub fn new(group_repo: G, availability_repo: A) -> Self {
        Self {
            group_repo,
            availability_repo,
        }
    }

    async fn require_membership(&self, group_id: &str, user_id: &str) -> Result<(), GatherlyError> {
        let membership = self.group_repo.find_membership(group_id, user_id).await?;
        if membership.is_none() {
            return Err(not_found(format!("Group not found: {}", group_id)));
        }
        Ok(())
    }

    /// List every record in the group.
    pub async fn list(
        &self,
        user: &CurrentUser,
        group_id: &str,
    ) -> Result<Vec<Availability>, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;
        Ok(self.availability_repo.list_by_group(group_id).await?)
    }

    /// List only the caller's records in the group.
    pub async fn list_mine(
        &self,
        user: &CurrentUser,
        group_id: &str,
    ) -> Result<Vec<Availability>, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;
        Ok(self
            .availability_repo
            .list_by_group_and_user(group_id, &user.id)
            .await?)
    }

    /// Create or overwrite the caller's record for a date.
    pub async fn upsert(
        &self,
        user: &CurrentUser,
        group_id: &str,
        req: UpsertAvailabilityRequest,
    ) -> Result<Availability, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;

        if !time::is_valid_date(&req.date) {
            return Err(validation_error(format!("Invalid date: {}", req.date)));
        }
        validate_fields(
            req.kind,
            &req.slots,
            req.start_time.as_deref(),
            req.end_time.as_deref(),
        )?;

        let record = Availability {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            group_id: group_id.to_string(),
            date: req.date,
            kind: req.kind,
            slots: req.slots,
            start_time: req.start_time,
            end_time: req.end_time,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        let stored = self.availability_repo.upsert(record).await?;
        debug!(
            "Availability stored for user {} on {} in group {}",
            user.id, stored.date, group_id
        );
        Ok(stored)
    }

    /// Update one of the caller's records in place.
    pub async fn update(
        &self,
        user: &CurrentUser,
        group_id: &str,
        availability_id: &str,
        req: UpdateAvailabilityRequest,
    ) -> Result<Availability, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;

        let existing = self
            .availability_repo
            .find_by_id(availability_id)
            .await?
            .filter(|record| record.group_id == group_id && record.user_id == user.id)
            .ok_or_else(|| not_found(format!("Availability not found: {}", availability_id)))?;

        validate_fields(
            req.kind,
            &req.slots,
            req.start_time.as_deref(),
            req.end_time.as_deref(),
        )?;

        let updated = Availability {
            kind: req.kind,
            slots: req.slots,
            start_time: req.start_time,
            end_time: req.end_time,
            ..existing
        };

        Ok(self.availability_repo.upsert(updated).await?)
    }

    /// Delete one of the caller's records.
    pub async fn delete(
        &self,
        user: &CurrentUser,
        group_id: &str,
        availability_id: &str,
    ) -> Result<(), GatherlyError> {
        self.require_membership(group_id, &user.id).await?;

        let existing = self
            .availability_repo
            .find_by_id(availability_id)
            .await?
            .filter(|record| record.group_id == group_id && record.user_id == user.id);
        if existing.is_none() {
            return Err(not_found(format!(
                "Availability not found: {}",
                availability_id
            )));
        }

        self.availability_repo.delete(availability_id).await?;
        Ok(())
    }

    /// Per-date counts, the recommended day, and (given a date) the
    /// suggested time of day.
    pub async fn summary(
        &self,
        user: &CurrentUser,
        group_id: &str,
        for_date: Option<&str>,
    ) -> Result<AvailabilitySummary, GatherlyError> {
        self.require_membership(group_id, &user.id).await?;

        if let Some(date) = for_date {
            if !time::is_valid_date(date) {
                return Err(validation_error(format!("Invalid date: {}", date)));
            }
        }

        let records = self.availability_repo.list_by_group(group_id).await?;
        let by_date = group_by_date(&records);

        let days = by_date
            .iter()
            .map(|(date, records)| DaySummary {
                date: date.clone(),
                available_count: records.len(),
                user_ids: records.iter().map(|r| r.user_id.clone()).collect(),
            })
            .collect();

        let today = time::today_string();
        let recommendation = recommend_day(&by_date, &today);

        let suggestion = for_date
            .and_then(|date| by_date.get(date))
            .and_then(|records| suggest_time(records));

        Ok(AvailabilitySummary {
            days,
            recommendation,
            suggestion,
        })
    }
}
