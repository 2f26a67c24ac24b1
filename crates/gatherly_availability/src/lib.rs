//! Availability tracking and best-day aggregation for Gatherly
//!
//! Members state which days they are free, whole-day or as named slots or a
//! clock-time range. The aggregator turns a group's records into per-date
//! counts, a recommended day (highest count, earliest date on ties), and a
//! time-of-day suggestion voted from the records of a single day.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

pub use logic::{DayRecommendation, TimeOfDay, TimeSuggestion};
pub use routes::routes;
pub use service::{AvailabilityService, AvailabilitySummary};

#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod logic_test;
