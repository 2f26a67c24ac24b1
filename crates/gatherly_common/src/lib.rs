// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod models; // Shared domain models
pub mod services; // Service abstractions
pub mod time; // Date and clock-time string helpers

// Re-export error types and utilities for easier access
pub use error::{
    conflict, config_error, exhausted, external_service_error, internal_error, not_found,
    validation_error, GatherlyError, HttpStatusCode,
};

// Re-export the service seams for easier access
pub use services::{
    notify_group_detached, notify_user_detached, BoxFuture, BoxedError, NotificationDispatcher,
    SendOutcome,
};
