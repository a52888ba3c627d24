//! PostgreSQL message store

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use super::{DbError, MessageStore};
use crate::models::{Message, Page, PageRequest};

/// Message store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn save(&self, message: &Message) -> Result<Message, DbError> {
        let saved: Message = sqlx::query_as(
            r#"
            INSERT INTO messages (id, username, content, created_at, updated_at, like_count)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                content = EXCLUDED.content,
                updated_at = EXCLUDED.updated_at,
                like_count = EXCLUDED.like_count
            RETURNING id, username, content, created_at, updated_at, like_count
            "#,
        )
        .bind(message.id())
        .bind(message.username())
        .bind(message.content())
        .bind(message.created_at())
        .bind(message.updated_at())
        .bind(message.like_count())
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DbError> {
        let message: Option<Message> = sqlx::query_as(
            r#"
            SELECT id, username, content, created_at, updated_at, like_count
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(%id, rows = result.rows_affected(), "deleted message");
        Ok(())
    }

    /// Uses a window function for the total count in the same query.
    async fn list_ordered_by_created_at_desc(
        &self,
        page: PageRequest,
    ) -> Result<Page<Message>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                username,
                content,
                created_at,
                updated_at,
                like_count,
                COUNT(*) OVER() as total
            FROM messages
            ORDER BY created_at DESC, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        // Past the last page the window yields no rows; fall back to a plain count
        let total = match rows.first() {
            Some(row) => row.try_get::<i64, _>("total")?,
            None if page.page > 0 => self.count().await?,
            None => 0,
        };

        let items = rows
            .iter()
            .map(Message::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total,
            page: page.page,
            size: page.size,
        })
    }

    async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
