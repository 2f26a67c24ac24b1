//! Repository for push tokens and notification preferences
//!
//! A token is unique by its value; re-registering moves it to the new user
//! rather than duplicating it. Preferences are opt-out flags keyed by
//! `(user_id, notification_type)`; an absent row means the type is enabled.

use crate::error::DbError;

pub use gatherly_common::models::{NotificationPreference, PushToken};

/// Repository for push tokens and notification preferences
pub trait PushRepository {
    /// Initialize the database schema for tokens and preferences
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert a token or reassign it to the given user if it already exists
    fn upsert_token(
        &self,
        token: PushToken,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Delete a user's registration of a token
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted, `false` if none existed
    fn delete_token(
        &self,
        user_id: &str,
        token: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Delete a token regardless of owner, used to prune tokens the push
    /// provider reports as invalid
    fn delete_token_value(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// List one user's registered tokens
    fn list_tokens_for_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<PushToken>, DbError>> + Send;

    /// List the registered tokens of several users at once
    fn list_tokens_for_users(
        &self,
        user_ids: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<PushToken>, DbError>> + Send;

    /// Insert or replace a preference flag
    fn upsert_preference(
        &self,
        preference: NotificationPreference,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find a preference flag; `None` means no opt-out is recorded
    fn find_preference(
        &self,
        user_id: &str,
        notification_type: &str,
    ) -> impl std::future::Future<Output = Result<Option<NotificationPreference>, DbError>> + Send;
}
