//! SQL implementation of the event repository

use crate::error::DbError;
use crate::repositories::events::{
    AttendeeStatus, Event, EventAttendee, EventRepository, EventStatus,
};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, warn};

/// SQL implementation of the event repository
#[derive(Debug, Clone)]
pub struct SqlEventRepository {
    db_client: DbClient,
}

impl SqlEventRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_event(row: &AnyRow) -> Event {
    let status_str: String = row.try_get("status").unwrap_or_default();
    let status = EventStatus::parse(&status_str).unwrap_or_else(|| {
        warn!("Unknown event status in database: {}", status_str);
        EventStatus::Pending
    });

    Event {
        id: row.try_get("id").unwrap_or_default(),
        group_id: row.try_get("group_id").unwrap_or_default(),
        title: row.try_get("title").unwrap_or_default(),
        description: row.try_get("description").ok(),
        location: row.try_get("location").ok(),
        date: row.try_get("date").unwrap_or_default(),
        time: row.try_get("time").ok(),
        status,
        created_by: row.try_get("created_by").unwrap_or_default(),
        created_at: row.try_get("created_at").ok(),
    }
}

fn row_to_attendee(row: &AnyRow) -> EventAttendee {
    let status_str: String = row.try_get("status").unwrap_or_default();
    let status = AttendeeStatus::parse(&status_str).unwrap_or_else(|| {
        warn!("Unknown attendee status in database: {}", status_str);
        AttendeeStatus::Pending
    });

    EventAttendee {
        event_id: row.try_get("event_id").unwrap_or_default(),
        user_id: row.try_get("user_id").unwrap_or_default(),
        status,
        responded_at: row.try_get("responded_at").ok(),
    }
}

impl EventRepository for SqlEventRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing events schema");

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                group_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                location TEXT,
                date TEXT NOT NULL,
                time TEXT,
                status TEXT NOT NULL,
                created_by TEXT NOT NULL,
                created_at TEXT
            )
        "#,
            )
            .await?;

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS event_attendees (
                event_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                status TEXT NOT NULL,
                responded_at TEXT,
                UNIQUE(event_id, user_id)
            )
        "#,
            )
            .await?;

        Ok(())
    }

    async fn create_with_attendees(
        &self,
        event: Event,
        attendees: Vec<EventAttendee>,
    ) -> Result<Event, DbError> {
        debug!(
            "Creating event '{}' with {} attendees",
            event.title,
            attendees.len()
        );

        let mut tx = self.db_client.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO events
                (id, group_id, title, description, location, date, time, status, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
        )
        .bind(&event.id)
        .bind(&event.group_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(&event.date)
        .bind(&event.time)
        .bind(event.status.as_str())
        .bind(&event.created_by)
        .bind(&event.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to insert event: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        for attendee in &attendees {
            sqlx::query(
                r#"
                INSERT INTO event_attendees (event_id, user_id, status, responded_at)
                VALUES ($1, $2, $3, $4)
            "#,
            )
            .bind(&attendee.event_id)
            .bind(&attendee.user_id)
            .bind(attendee.status.as_str())
            .bind(&attendee.responded_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert attendee: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        Ok(event)
    }

    async fn find_by_id(&self, event_id: &str) -> Result<Option<Event>, DbError> {
        let query = r#"
            SELECT id, group_id, title, description, location, date, time, status,
                   created_by, created_at
            FROM events
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(event_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find event: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.map(|row| row_to_event(&row)))
    }

    async fn list_by_group(&self, group_id: &str) -> Result<Vec<Event>, DbError> {
        let query = r#"
            SELECT id, group_id, title, description, location, date, time, status,
                   created_by, created_at
            FROM events
            WHERE group_id = $1
            ORDER BY date
        "#;

        let rows = sqlx::query(query)
            .bind(group_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list events: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_event).collect())
    }

    async fn list_from_date(&self, group_id: &str, from_date: &str) -> Result<Vec<Event>, DbError> {
        // Date strings are YYYY-MM-DD, so lexicographic comparison is
        // chronological comparison.
        let query = r#"
            SELECT id, group_id, title, description, location, date, time, status,
                   created_by, created_at
            FROM events
            WHERE group_id = $1 AND date >= $2
            ORDER BY date
        "#;

        let rows = sqlx::query(query)
            .bind(group_id)
            .bind(from_date)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list upcoming events: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_event).collect())
    }

    async fn list_between_dates(
        &self,
        from_date: &str,
        to_date: &str,
    ) -> Result<Vec<Event>, DbError> {
        let query = r#"
            SELECT id, group_id, title, description, location, date, time, status,
                   created_by, created_at
            FROM events
            WHERE date >= $1 AND date <= $2
            ORDER BY date
        "#;

        let rows = sqlx::query(query)
            .bind(from_date)
            .bind(to_date)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list events between dates: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_event).collect())
    }

    async fn update_status(&self, event_id: &str, status: EventStatus) -> Result<(), DbError> {
        debug!("Updating event {} status to {}", event_id, status.as_str());

        let result = sqlx::query("UPDATE events SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(event_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update event status: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Event not found: {}", event_id)));
        }

        Ok(())
    }

    async fn find_attendee(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<EventAttendee>, DbError> {
        let query = r#"
            SELECT event_id, user_id, status, responded_at
            FROM event_attendees
            WHERE event_id = $1 AND user_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find attendee: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.map(|row| row_to_attendee(&row)))
    }

    async fn list_attendees(&self, event_id: &str) -> Result<Vec<EventAttendee>, DbError> {
        let query = r#"
            SELECT event_id, user_id, status, responded_at
            FROM event_attendees
            WHERE event_id = $1
        "#;

        let rows = sqlx::query(query)
            .bind(event_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list attendees: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_attendee).collect())
    }

    async fn update_attendee_status(
        &self,
        event_id: &str,
        user_id: &str,
        status: AttendeeStatus,
        responded_at: &str,
    ) -> Result<(), DbError> {
        debug!(
            "Recording attendee response: event={} user={} status={}",
            event_id,
            user_id,
            status.as_str()
        );

        let query = r#"
            UPDATE event_attendees
            SET status = $1, responded_at = $2
            WHERE event_id = $3 AND user_id = $4
        "#;

        let result = sqlx::query(query)
            .bind(status.as_str())
            .bind(responded_at)
            .bind(event_id)
            .bind(user_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update attendee status: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!(
                "Attendee not found: event={} user={}",
                event_id, user_id
            )));
        }

        Ok(())
    }

    async fn create_attendees_skip_duplicates(
        &self,
        attendees: Vec<EventAttendee>,
    ) -> Result<u64, DbError> {
        let mut inserted = 0;

        for attendee in &attendees {
            let result = sqlx::query(
                r#"
                INSERT INTO event_attendees (event_id, user_id, status, responded_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT(event_id, user_id) DO NOTHING
            "#,
            )
            .bind(&attendee.event_id)
            .bind(&attendee.user_id)
            .bind(attendee.status.as_str())
            .bind(&attendee.responded_at)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert attendee: {}", e);
                DbError::QueryError(e.to_string())
            })?;

            inserted += result.rows_affected();
        }

        debug!(
            "Backfilled {} of {} attendee rows",
            inserted,
            attendees.len()
        );
        Ok(inserted)
    }
}
