//! SQL implementation of the availability repository

use crate::error::DbError;
use crate::repositories::availability::{Availability, AvailabilityKind, AvailabilityRepository};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, warn};

/// SQL implementation of the availability repository
#[derive(Debug, Clone)]
pub struct SqlAvailabilityRepository {
    db_client: DbClient,
}

impl SqlAvailabilityRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

// Slots are stored as a JSON array in a TEXT column so the schema stays
// portable across the Any driver's backends.
fn row_to_availability(row: &AnyRow) -> Availability {
    let kind_str: String = row.try_get("kind").unwrap_or_default();
    let kind = AvailabilityKind::parse(&kind_str).unwrap_or_else(|| {
        warn!("Unknown availability kind in database: {}", kind_str);
        AvailabilityKind::Day
    });

    let slots_json: String = row.try_get("slots").unwrap_or_default();
    let slots: Vec<String> = serde_json::from_str(&slots_json).unwrap_or_default();

    Availability {
        id: row.try_get("id").unwrap_or_default(),
        user_id: row.try_get("user_id").unwrap_or_default(),
        group_id: row.try_get("group_id").unwrap_or_default(),
        date: row.try_get("date").unwrap_or_default(),
        kind,
        slots,
        start_time: row.try_get("start_time").ok(),
        end_time: row.try_get("end_time").ok(),
        created_at: row.try_get("created_at").ok(),
    }
}

impl AvailabilityRepository for SqlAvailabilityRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing availability schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS availability (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                group_id TEXT NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL,
                slots TEXT NOT NULL DEFAULT '[]',
                start_time TEXT,
                end_time TEXT,
                created_at TEXT,
                UNIQUE(user_id, group_id, date)
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn upsert(&self, record: Availability) -> Result<Availability, DbError> {
        debug!(
            "Upserting availability: user={} group={} date={}",
            record.user_id, record.group_id, record.date
        );

        let slots_json = serde_json::to_string(&record.slots)
            .map_err(|e| DbError::QueryError(format!("Failed to encode slots: {}", e)))?;

        let query = r#"
            INSERT INTO availability
                (id, user_id, group_id, date, kind, slots, start_time, end_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT(user_id, group_id, date) DO UPDATE SET
                kind = excluded.kind,
                slots = excluded.slots,
                start_time = excluded.start_time,
                end_time = excluded.end_time
        "#;

        sqlx::query(query)
            .bind(&record.id)
            .bind(&record.user_id)
            .bind(&record.group_id)
            .bind(&record.date)
            .bind(record.kind.as_str())
            .bind(&slots_json)
            .bind(&record.start_time)
            .bind(&record.end_time)
            .bind(&record.created_at)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert availability: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        // The id of an existing row survives the upsert, so read the row back
        // to report the id actually stored.
        let query = r#"
            SELECT id, user_id, group_id, date, kind, slots, start_time, end_time, created_at
            FROM availability
            WHERE user_id = $1 AND group_id = $2 AND date = $3
        "#;

        let row = sqlx::query(query)
            .bind(&record.user_id)
            .bind(&record.group_id)
            .bind(&record.date)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(row_to_availability(&row))
    }

    async fn find_by_id(&self, availability_id: &str) -> Result<Option<Availability>, DbError> {
        let query = r#"
            SELECT id, user_id, group_id, date, kind, slots, start_time, end_time, created_at
            FROM availability
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(availability_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find availability: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.map(|row| row_to_availability(&row)))
    }

    async fn list_by_group(&self, group_id: &str) -> Result<Vec<Availability>, DbError> {
        let query = r#"
            SELECT id, user_id, group_id, date, kind, slots, start_time, end_time, created_at
            FROM availability
            WHERE group_id = $1
            ORDER BY date
        "#;

        let rows = sqlx::query(query)
            .bind(group_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list availability for group: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_availability).collect())
    }

    async fn list_by_group_and_user(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Vec<Availability>, DbError> {
        let query = r#"
            SELECT id, user_id, group_id, date, kind, slots, start_time, end_time, created_at
            FROM availability
            WHERE group_id = $1 AND user_id = $2
            ORDER BY date
        "#;

        let rows = sqlx::query(query)
            .bind(group_id)
            .bind(user_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list availability for user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_availability).collect())
    }

    async fn delete(&self, availability_id: &str) -> Result<bool, DbError> {
        debug!("Deleting availability: {}", availability_id);

        let result = sqlx::query("DELETE FROM availability WHERE id = $1")
            .bind(availability_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete availability: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
