//! Repository for availability records
//!
//! Each record states how one user is free on one date in one group. The
//! store upserts on `(user_id, group_id, date)`, so re-submitting a date
//! replaces the earlier record instead of accumulating duplicates.

use crate::error::DbError;

pub use gatherly_common::models::{Availability, AvailabilityKind};

/// Repository for availability records
pub trait AvailabilityRepository {
    /// Initialize the database schema
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert or replace the record for `(user_id, group_id, date)`
    fn upsert(
        &self,
        record: Availability,
    ) -> impl std::future::Future<Output = Result<Availability, DbError>> + Send;

    /// Find one record by id
    fn find_by_id(
        &self,
        availability_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Availability>, DbError>> + Send;

    /// List every record in a group, ordered by date
    fn list_by_group(
        &self,
        group_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Availability>, DbError>> + Send;

    /// List one user's records in a group, ordered by date
    fn list_by_group_and_user(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Availability>, DbError>> + Send;

    /// Delete one record
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted, `false` if none existed
    fn delete(
        &self,
        availability_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
