//! Message store contract and its implementations
//!
//! - [`PgMessageStore`]: PostgreSQL via sqlx
//! - [`InMemoryMessageStore`]: HashMap behind a lock, for tests and local runs

pub mod memory;
pub mod messages;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Message, Page, PageRequest};

pub use memory::InMemoryMessageStore;
pub use messages::PgMessageStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Durable storage for messages, keyed by id.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Insert or replace by id. `created_at` of an existing row is kept.
    async fn save(&self, message: &Message) -> Result<Message, DbError>;

    /// Look up a message. Absence is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DbError>;

    /// Remove a message if present. Deleting a missing id is a no-op.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), DbError>;

    /// Page through all messages, newest first (ties ordered by id).
    async fn list_ordered_by_created_at_desc(
        &self,
        page: PageRequest,
    ) -> Result<Page<Message>, DbError>;

    /// Total number of stored messages.
    async fn count(&self) -> Result<i64, DbError>;
}
