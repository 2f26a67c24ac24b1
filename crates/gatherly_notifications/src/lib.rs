//! Push notifications for Gatherly
//!
//! Device tokens are registered per user and fanned out over Firebase
//! Cloud Messaging. Tokens FCM reports as dead are pruned on the spot.
//! An hourly sweep reminds still-pending attendees about events happening
//! within the next day.

pub mod auth;
pub mod client;
pub mod doc;
pub mod handlers;
pub mod reminder;
pub mod routes;
pub mod sender;
pub mod service;

pub use client::{FcmClient, FcmError};
pub use reminder::ReminderJob;
pub use routes::routes;
pub use sender::{PushSendError, PushSender};
pub use service::NotificationService;

#[cfg(test)]
mod client_test;
#[cfg(test)]
mod reminder_test;
#[cfg(test)]
mod test_support;
