//! Event planning and attendance tracking for Gatherly
//!
//! Events live inside a group. Creating one gives every current member an
//! attendee row (the creator pre-confirmed); each response triggers a
//! recomputation of the event status: all confirmed promotes, any decline
//! demotes. Members who join later are backfilled onto upcoming events.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

pub use logic::{CreateEventRequest, EventWithAttendees, RespondRequest};
pub use routes::routes;
pub use service::EventsService;

#[cfg(test)]
pub(crate) mod test_support;
