//! Repository for application users
//!
//! Users are created lazily the first time a verified credential is seen,
//! so the only write paths are `create` and the profile update.

use crate::error::DbError;

pub use gatherly_common::models::User;

/// Repository for application users
pub trait UserRepository {
    /// Initialize the database schema
    ///
    /// Creates the users table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find a user by their id (the external subject id)
    fn find_by_id(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;

    /// Insert a new user row
    fn create(&self, user: User)
        -> impl std::future::Future<Output = Result<User, DbError>> + Send;

    /// Update a user's profile fields; `None` leaves a field untouched
    ///
    /// # Returns
    ///
    /// The updated user, or [`DbError::NotFound`] if the id is unknown
    fn update_profile(
        &self,
        user_id: &str,
        name: Option<&str>,
        avatar_emoji: Option<&str>,
    ) -> impl std::future::Future<Output = Result<User, DbError>> + Send;
}
