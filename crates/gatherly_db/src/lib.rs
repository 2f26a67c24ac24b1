//! Database integration for Gatherly
//!
//! This crate provides a database client that is designed to be database agnostic,
//! using SQLx as the underlying database library. It supports SQLite, PostgreSQL,
//! and MySQL databases through feature flags, and holds the repository traits for
//! all application entities.
//!
//! # Example
//!
//! ```rust,no_run
//! use gatherly_db::DbClient;
//! use std::sync::Arc;
//!
//! async fn setup_db() -> Result<DbClient, Box<dyn std::error::Error>> {
//!     let config = Arc::new(gatherly_config::load_config()?);
//!     let db_client = DbClient::new(&config).await?;
//!     Ok(db_client)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

// Register the SQLite driver when the crate is loaded
#[cfg(feature = "sqlite")]
mod sqlite_driver {
    // This import ensures the SQLite driver is linked and registered
    #[allow(unused_imports)]
    use sqlx::sqlite::SqlitePoolOptions as _;
}

pub use client::{DbClient, DbTransaction};
pub use error::DbError;

// Re-export the repository traits and implementations for ease of use
pub use repositories::{
    AvailabilityRepository, EventRepository, GroupRepository, PushRepository,
    SqlAvailabilityRepository, SqlEventRepository, SqlGroupRepository, SqlPushRepository,
    SqlUserRepository, UserRepository,
};
