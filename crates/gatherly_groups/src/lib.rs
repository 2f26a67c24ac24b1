//! Group and membership management for Gatherly
//!
//! Groups are joined by an 8-digit invite code. Creation makes the caller
//! the first member; joining backfills the new member onto the group's
//! upcoming events; leaving removes the membership but keeps existing
//! attendee rows in place.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

pub use logic::{CreateGroupRequest, InviteInfo, JoinGroupRequest};
pub use routes::routes;
pub use service::GroupsService;
