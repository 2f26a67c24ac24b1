//! Repository modules for database access
//!
//! This module contains repository traits and implementations for the
//! application's entities. Each trait has one SQL implementation built on
//! [`crate::DbClient`].

pub mod availability;
pub mod availability_sql;
pub mod events;
pub mod events_sql;
pub mod groups;
pub mod groups_sql;
pub mod push;
pub mod push_sql;
pub mod users;
pub mod users_sql;

// Re-export the repository traits and implementations for ease of use
pub use availability::AvailabilityRepository;
pub use availability_sql::SqlAvailabilityRepository;
pub use events::EventRepository;
pub use events_sql::SqlEventRepository;
pub use groups::GroupRepository;
pub use groups_sql::SqlGroupRepository;
pub use push::PushRepository;
pub use push_sql::SqlPushRepository;
pub use users::UserRepository;
pub use users_sql::SqlUserRepository;
