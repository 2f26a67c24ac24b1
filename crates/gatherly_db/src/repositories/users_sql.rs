//! SQL implementation of the user repository

use crate::error::DbError;
use crate::repositories::users::{User, UserRepository};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the user repository
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    db_client: DbClient,
}

impl SqlUserRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_user(row: &AnyRow) -> User {
    User {
        id: row.try_get("id").unwrap_or_default(),
        email: row.try_get("email").unwrap_or_default(),
        name: row.try_get("name").unwrap_or_default(),
        avatar_emoji: row.try_get("avatar_emoji").unwrap_or_default(),
        created_at: row.try_get("created_at").ok(),
    }
}

impl UserRepository for SqlUserRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing users schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                name TEXT NOT NULL,
                avatar_emoji TEXT NOT NULL,
                created_at TEXT
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, DbError> {
        let query = r#"
            SELECT id, email, name, avatar_emoji, created_at
            FROM users
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.map(|row| row_to_user(&row)))
    }

    async fn create(&self, user: User) -> Result<User, DbError> {
        debug!("Creating user: {}", user.id);

        let query = r#"
            INSERT INTO users (id, email, name, avatar_emoji, created_at)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.avatar_emoji)
            .bind(&user.created_at)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        name: Option<&str>,
        avatar_emoji: Option<&str>,
    ) -> Result<User, DbError> {
        debug!("Updating profile for user: {}", user_id);

        let query = r#"
            UPDATE users
            SET name = COALESCE($1, name),
                avatar_emoji = COALESCE($2, avatar_emoji)
            WHERE id = $3
        "#;

        let result = sqlx::query(query)
            .bind(name)
            .bind(avatar_emoji)
            .bind(user_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update user profile: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("User not found: {}", user_id)));
        }

        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("User not found: {}", user_id)))
    }
}
