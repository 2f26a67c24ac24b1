//! SQL implementation of the push repository

use crate::error::DbError;
use crate::repositories::push::{NotificationPreference, PushRepository, PushToken};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the push repository
#[derive(Debug, Clone)]
pub struct SqlPushRepository {
    db_client: DbClient,
}

impl SqlPushRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_token(row: &AnyRow) -> PushToken {
    PushToken {
        user_id: row.try_get("user_id").unwrap_or_default(),
        token: row.try_get("token").unwrap_or_default(),
        platform: row.try_get("platform").unwrap_or_default(),
    }
}

impl PushRepository for SqlPushRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing push schema");

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS push_tokens (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                platform TEXT NOT NULL
            )
        "#,
            )
            .await?;

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS notification_preferences (
                user_id TEXT NOT NULL,
                notification_type TEXT NOT NULL,
                enabled INTEGER NOT NULL,
                UNIQUE(user_id, notification_type)
            )
        "#,
            )
            .await?;

        Ok(())
    }

    async fn upsert_token(&self, token: PushToken) -> Result<(), DbError> {
        debug!("Registering push token for user: {}", token.user_id);

        // A token re-registered from another account moves to the new owner.
        let query = r#"
            INSERT INTO push_tokens (token, user_id, platform)
            VALUES ($1, $2, $3)
            ON CONFLICT(token) DO UPDATE SET
                user_id = excluded.user_id,
                platform = excluded.platform
        "#;

        sqlx::query(query)
            .bind(&token.token)
            .bind(&token.user_id)
            .bind(&token.platform)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert push token: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(())
    }

    async fn delete_token(&self, user_id: &str, token: &str) -> Result<bool, DbError> {
        debug!("Unregistering push token for user: {}", user_id);

        let result = sqlx::query("DELETE FROM push_tokens WHERE user_id = $1 AND token = $2")
            .bind(user_id)
            .bind(token)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete push token: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_token_value(&self, token: &str) -> Result<(), DbError> {
        sqlx::query("DELETE FROM push_tokens WHERE token = $1")
            .bind(token)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to prune push token: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(())
    }

    async fn list_tokens_for_user(&self, user_id: &str) -> Result<Vec<PushToken>, DbError> {
        let rows = sqlx::query("SELECT token, user_id, platform FROM push_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list push tokens: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(row_to_token).collect())
    }

    async fn list_tokens_for_users(&self, user_ids: &[String]) -> Result<Vec<PushToken>, DbError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        // Build the placeholder list by hand; the Any driver has no array
        // bind support.
        let placeholders: Vec<String> = (1..=user_ids.len()).map(|i| format!("${}", i)).collect();
        let query = format!(
            "SELECT token, user_id, platform FROM push_tokens WHERE user_id IN ({})",
            placeholders.join(", ")
        );

        let mut q = sqlx::query(&query);
        for user_id in user_ids {
            q = q.bind(user_id);
        }

        let rows = q.fetch_all(self.db_client.pool()).await.map_err(|e| {
            error!("Failed to list push tokens for users: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(rows.iter().map(row_to_token).collect())
    }

    async fn upsert_preference(&self, preference: NotificationPreference) -> Result<(), DbError> {
        debug!(
            "Setting notification preference: user={} type={} enabled={}",
            preference.user_id, preference.notification_type, preference.enabled
        );

        let query = r#"
            INSERT INTO notification_preferences (user_id, notification_type, enabled)
            VALUES ($1, $2, $3)
            ON CONFLICT(user_id, notification_type) DO UPDATE SET
                enabled = excluded.enabled
        "#;

        sqlx::query(query)
            .bind(&preference.user_id)
            .bind(&preference.notification_type)
            .bind(if preference.enabled { 1i64 } else { 0i64 })
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert notification preference: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(())
    }

    async fn find_preference(
        &self,
        user_id: &str,
        notification_type: &str,
    ) -> Result<Option<NotificationPreference>, DbError> {
        let query = r#"
            SELECT user_id, notification_type, enabled
            FROM notification_preferences
            WHERE user_id = $1 AND notification_type = $2
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .bind(notification_type)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find notification preference: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.map(|row| {
            let enabled: i64 = row.try_get("enabled").unwrap_or(1);
            NotificationPreference {
                user_id: row.try_get("user_id").unwrap_or_default(),
                notification_type: row.try_get("notification_type").unwrap_or_default(),
                enabled: enabled != 0,
            }
        }))
    }
}
