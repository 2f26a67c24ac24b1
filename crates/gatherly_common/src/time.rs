//! Date and clock-time string helpers.
//!
//! The application treats dates as plain `YYYY-MM-DD` strings and clock
//! times as `HH:MM` strings. Comparisons are lexicographic, which for these
//! formats is chronological, so none of the helpers here ever touch a time
//! zone beyond picking "today" in UTC.

use chrono::{Duration, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether `value` is a real calendar date in `YYYY-MM-DD` form.
pub fn is_valid_date(value: &str) -> bool {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        // Reject variants chrono accepts but we don't, like `2026-1-5`.
        Ok(date) => date.format(DATE_FORMAT).to_string() == value,
        Err(_) => false,
    }
}

/// Whether `value` is a clock time in `HH:MM` form.
pub fn is_valid_time(value: &str) -> bool {
    parse_time(value).is_some()
}

/// Parse an `HH:MM` string into `(hour, minute)`.
pub fn parse_time(value: &str) -> Option<(u32, u32)> {
    let (hh, mm) = value.split_once(':')?;
    if hh.len() != 2 || mm.len() != 2 {
        return None;
    }
    let hour: u32 = hh.parse().ok()?;
    let minute: u32 = mm.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// The hour component of an `HH:MM` string.
pub fn hour_of(value: &str) -> Option<u32> {
    parse_time(value).map(|(hour, _)| hour)
}

/// Today's date in UTC as a `YYYY-MM-DD` string.
pub fn today_string() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Tomorrow's date in UTC as a `YYYY-MM-DD` string.
pub fn tomorrow_string() -> String {
    (Utc::now().date_naive() + Duration::days(1))
        .format(DATE_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_dates() {
        assert!(is_valid_date("2026-08-24"));
        assert!(is_valid_date("2024-02-29"));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(!is_valid_date("2026-8-24"));
        assert!(!is_valid_date("24-08-2026"));
        assert!(!is_valid_date("2026-13-01"));
        assert!(!is_valid_date("2025-02-29"));
        assert!(!is_valid_date("not a date"));
    }

    #[test]
    fn parses_clock_times() {
        assert_eq!(parse_time("09:30"), Some((9, 30)));
        assert_eq!(parse_time("00:00"), Some((0, 0)));
        assert_eq!(parse_time("23:59"), Some((23, 59)));
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("12:60"));
        assert!(!is_valid_time("9:30"));
        assert!(!is_valid_time("12-30"));
        assert!(!is_valid_time(""));
    }
}
