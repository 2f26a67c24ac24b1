//! Pure aggregation over a group's availability records.
//!
//! Given everyone's stated free time, these functions answer two questions:
//! which upcoming day suits the most people, and what part of that day. The
//! store guarantees one record per user per date, so a date's record count
//! is its distinct-user count. Absence of data is always `None`, never an
//! error.

use gatherly_common::models::{Availability, AvailabilityKind};
use gatherly_common::time::hour_of;
use serde::Serialize;
use std::collections::BTreeMap;

/// Canonical slot names accepted in `slots`-kind records. Unknown names are
/// ignored at vote time.
pub const SLOT_MORNING: &str = "morning";
pub const SLOT_AFTERNOON: &str = "afternoon";
pub const SLOT_NIGHT: &str = "night";

/// The three coarse parts of a day availability is voted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => SLOT_MORNING,
            TimeOfDay::Afternoon => SLOT_AFTERNOON,
            TimeOfDay::Night => SLOT_NIGHT,
        }
    }

    /// The clock time prefilled into an event form for this bucket. Never
    /// persisted.
    pub fn prefill_time(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "10:00",
            TimeOfDay::Afternoon => "17:00",
            TimeOfDay::Night => "21:00",
        }
    }
}

/// The day that suits the most people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DayRecommendation {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Distinct users available on that date.
    pub available_count: usize,
}

/// The winning time-of-day bucket for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimeSuggestion {
    pub time_of_day: TimeOfDay,
    pub votes: usize,
    /// `HH:MM` prefill for the winning bucket.
    pub suggested_time: String,
}

/// Group records by date. The map is ordered by date, and each list's
/// length is the distinct available-user count for that date.
pub fn group_by_date(records: &[Availability]) -> BTreeMap<String, Vec<&Availability>> {
    let mut by_date: BTreeMap<String, Vec<&Availability>> = BTreeMap::new();
    for record in records {
        by_date.entry(record.date.clone()).or_default().push(record);
    }
    by_date
}

/// Pick the best upcoming day: among dates today-or-later with at least one
/// record, the highest count wins, and a tie goes to the earliest date.
pub fn recommend_day(
    by_date: &BTreeMap<String, Vec<&Availability>>,
    today: &str,
) -> Option<DayRecommendation> {
    let mut best: Option<DayRecommendation> = None;

    // Iteration is in date order, so strictly-greater keeps the earliest
    // date on ties.
    for (date, records) in by_date {
        if date.as_str() < today || records.is_empty() {
            continue;
        }
        let count = records.len();
        if best.as_ref().map_or(true, |b| count > b.available_count) {
            best = Some(DayRecommendation {
                date: date.clone(),
                available_count: count,
            });
        }
    }

    best
}

/// The buckets one record votes for.
fn votes_for(record: &Availability) -> (bool, bool, bool) {
    match record.kind {
        AvailabilityKind::Day => (true, true, true),
        AvailabilityKind::Slots => {
            let has = |name: &str| record.slots.iter().any(|s| s == name);
            (has(SLOT_MORNING), has(SLOT_AFTERNOON), has(SLOT_NIGHT))
        }
        AvailabilityKind::Range => {
            let (Some(start), Some(end)) = (
                record.start_time.as_deref().and_then(hour_of),
                record.end_time.as_deref().and_then(hour_of),
            ) else {
                return (false, false, false);
            };
            // Hour-only overlap with morning 8-13, afternoon 14-19,
            // night 20 onward.
            let morning = start <= 13 && end >= 8;
            let afternoon = start <= 19 && end >= 14;
            let night = end >= 20 || start >= 20;
            (morning, afternoon, night)
        }
    }
}

/// Vote one date's records into time-of-day buckets and pick a winner.
///
/// Ties resolve morning over afternoon over night; zero votes in every
/// bucket means no suggestion.
pub fn suggest_time(records: &[&Availability]) -> Option<TimeSuggestion> {
    let mut morning = 0usize;
    let mut afternoon = 0usize;
    let mut night = 0usize;

    for record in records {
        let (m, a, n) = votes_for(record);
        morning += usize::from(m);
        afternoon += usize::from(a);
        night += usize::from(n);
    }

    let buckets = [
        (TimeOfDay::Morning, morning),
        (TimeOfDay::Afternoon, afternoon),
        (TimeOfDay::Night, night),
    ];

    // Tie order is the array order, so strictly-greater keeps the earlier
    // bucket.
    let (winner, votes) = buckets
        .into_iter()
        .fold(None, |best: Option<(TimeOfDay, usize)>, candidate| {
            match best {
                Some((_, best_votes)) if candidate.1 <= best_votes => best,
                _ if candidate.1 == 0 => best,
                _ => Some(candidate),
            }
        })?;

    Some(TimeSuggestion {
        time_of_day: winner,
        votes,
        suggested_time: winner.prefill_time().to_string(),
    })
}
