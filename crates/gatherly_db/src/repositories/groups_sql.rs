//! SQL implementation of the group repository

use crate::error::DbError;
use crate::repositories::groups::{Group, GroupMember, GroupRepository, User};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the group repository
#[derive(Debug, Clone)]
pub struct SqlGroupRepository {
    db_client: DbClient,
}

impl SqlGroupRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_group(row: &AnyRow) -> Group {
    Group {
        id: row.try_get("id").unwrap_or_default(),
        name: row.try_get("name").unwrap_or_default(),
        emoji: row.try_get("emoji").unwrap_or_default(),
        invite_code: row.try_get("invite_code").unwrap_or_default(),
        created_by: row.try_get("created_by").unwrap_or_default(),
        created_at: row.try_get("created_at").ok(),
    }
}

fn row_to_member(row: &AnyRow) -> GroupMember {
    GroupMember {
        group_id: row.try_get("group_id").unwrap_or_default(),
        user_id: row.try_get("user_id").unwrap_or_default(),
        joined_at: row.try_get("joined_at").ok(),
    }
}

impl GroupRepository for SqlGroupRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing groups schema");

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS groups (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                emoji TEXT NOT NULL,
                invite_code TEXT NOT NULL UNIQUE,
                created_by TEXT NOT NULL,
                created_at TEXT
            )
        "#,
            )
            .await?;

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS group_members (
                group_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                joined_at TEXT,
                UNIQUE(group_id, user_id)
            )
        "#,
            )
            .await?;

        info!("Groups schema initialized successfully");
        Ok(())
    }

    async fn create_group(&self, group: Group) -> Result<Group, DbError> {
        debug!("Creating group: {}", group.name);

        // Group row and creator membership succeed or fail together.
        let mut tx = self.db_client.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO groups (id, name, emoji, invite_code, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#,
        )
        .bind(&group.id)
        .bind(&group.name)
        .bind(&group.emoji)
        .bind(&group.invite_code)
        .bind(&group.created_by)
        .bind(&group.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to insert group: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id, joined_at)
            VALUES ($1, $2, $3)
        "#,
        )
        .bind(&group.id)
        .bind(&group.created_by)
        .bind(&group.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to insert creator membership: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        Ok(group)
    }

    async fn find_by_id(&self, group_id: &str) -> Result<Option<Group>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, name, emoji, invite_code, created_by, created_at
            FROM groups
            WHERE id = $1
        "#,
        )
        .bind(group_id)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to find group: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(result.map(|row| row_to_group(&row)))
    }

    async fn find_by_invite_code(&self, invite_code: &str) -> Result<Option<Group>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, name, emoji, invite_code, created_by, created_at
            FROM groups
            WHERE invite_code = $1
        "#,
        )
        .bind(invite_code)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to find group by invite code: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(result.map(|row| row_to_group(&row)))
    }

    async fn invite_code_exists(&self, invite_code: &str) -> Result<bool, DbError> {
        let result = sqlx::query("SELECT 1 AS present FROM groups WHERE invite_code = $1")
            .bind(invite_code)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Group>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT g.id, g.name, g.emoji, g.invite_code, g.created_by, g.created_at
            FROM groups g
            INNER JOIN group_members m ON m.group_id = g.id
            WHERE m.user_id = $1
            ORDER BY g.created_at
        "#,
        )
        .bind(user_id)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to list groups for user: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(rows.iter().map(row_to_group).collect())
    }

    async fn update_invite_code(&self, group_id: &str, invite_code: &str) -> Result<(), DbError> {
        debug!("Updating invite code for group: {}", group_id);

        let result = sqlx::query("UPDATE groups SET invite_code = $1 WHERE id = $2")
            .bind(invite_code)
            .bind(group_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update invite code: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Group not found: {}", group_id)));
        }

        Ok(())
    }

    async fn find_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Option<GroupMember>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT group_id, user_id, joined_at
            FROM group_members
            WHERE group_id = $1 AND user_id = $2
        "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to find membership: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(result.map(|row| row_to_member(&row)))
    }

    async fn create_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<GroupMember, DbError> {
        debug!("Creating membership: group={} user={}", group_id, user_id);

        let joined_at = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id, joined_at)
            VALUES ($1, $2, $3)
        "#,
        )
        .bind(group_id)
        .bind(user_id)
        .bind(&joined_at)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert membership: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(GroupMember {
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
            joined_at: Some(joined_at),
        })
    }

    async fn delete_membership(&self, group_id: &str, user_id: &str) -> Result<bool, DbError> {
        debug!("Deleting membership: group={} user={}", group_id, user_id);

        let result = sqlx::query("DELETE FROM group_members WHERE group_id = $1 AND user_id = $2")
            .bind(group_id)
            .bind(user_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete membership: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMember>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT group_id, user_id, joined_at
            FROM group_members
            WHERE group_id = $1
            ORDER BY joined_at
        "#,
        )
        .bind(group_id)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to list members: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(rows.iter().map(row_to_member).collect())
    }

    async fn list_member_users(&self, group_id: &str) -> Result<Vec<User>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.email, u.name, u.avatar_emoji, u.created_at
            FROM users u
            INNER JOIN group_members m ON m.user_id = u.id
            WHERE m.group_id = $1
            ORDER BY m.joined_at
        "#,
        )
        .bind(group_id)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to list member users: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(rows
            .iter()
            .map(|row| User {
                id: row.try_get("id").unwrap_or_default(),
                email: row.try_get("email").unwrap_or_default(),
                name: row.try_get("name").unwrap_or_default(),
                avatar_emoji: row.try_get("avatar_emoji").unwrap_or_default(),
                created_at: row.try_get("created_at").ok(),
            })
            .collect())
    }
}
