//! Repository for groups and group memberships
//!
//! Groups and their membership rows live together because every membership
//! operation is scoped to a group, and group creation inserts the creator's
//! membership in the same transaction.
//!
//! Uniqueness rules enforced by the schema:
//! - `invite_code` is unique among all groups
//! - `(group_id, user_id)` is unique among memberships

use crate::error::DbError;

pub use gatherly_common::models::{Group, GroupMember, User};

/// Repository for groups and group memberships
pub trait GroupRepository {
    /// Initialize the database schema for groups and memberships
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert a group and the creator's membership row in one transaction
    fn create_group(
        &self,
        group: Group,
    ) -> impl std::future::Future<Output = Result<Group, DbError>> + Send;

    /// Find a group by id
    fn find_by_id(
        &self,
        group_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Group>, DbError>> + Send;

    /// Find a group by its invite code
    fn find_by_invite_code(
        &self,
        invite_code: &str,
    ) -> impl std::future::Future<Output = Result<Option<Group>, DbError>> + Send;

    /// Whether any group already uses the given invite code
    fn invite_code_exists(
        &self,
        invite_code: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// List all groups the user is a member of
    fn list_for_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Group>, DbError>> + Send;

    /// Replace a group's invite code
    fn update_invite_code(
        &self,
        group_id: &str,
        invite_code: &str,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find one membership row
    fn find_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<GroupMember>, DbError>> + Send;

    /// Insert a membership row
    fn create_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<GroupMember, DbError>> + Send;

    /// Delete a membership row
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted, `false` if none existed
    fn delete_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// List the membership rows of a group
    fn list_members(
        &self,
        group_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<GroupMember>, DbError>> + Send;

    /// List the member users of a group (joined with the users table)
    fn list_member_users(
        &self,
        group_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<User>, DbError>> + Send;
}
