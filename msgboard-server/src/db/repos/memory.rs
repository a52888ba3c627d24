//! In-memory message store for tests and database-free runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DbError, MessageStore};
use crate::models::{Message, Page, PageRequest};

/// Thread-safe in-memory message store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    messages: Arc<RwLock<HashMap<Uuid, Message>>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn save(&self, message: &Message) -> Result<Message, DbError> {
        let mut messages = self.messages.write().await;
        let mut stored = message.clone();
        if let Some(existing) = messages.get(&message.id()) {
            // Mirror the upsert: an existing row keeps its creation time
            stored.keep_created_at(existing.created_at());
        }
        messages.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DbError> {
        Ok(self.messages.read().await.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DbError> {
        self.messages.write().await.remove(&id);
        Ok(())
    }

    async fn list_ordered_by_created_at_desc(
        &self,
        page: PageRequest,
    ) -> Result<Page<Message>, DbError> {
        let messages = self.messages.read().await;

        let mut all: Vec<&Message> = messages.values().collect();
        all.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = all
            .into_iter()
            .skip(offset)
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(Page {
            items,
            total: messages.len() as i64,
            page: page.page,
            size: page.size,
        })
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(self.messages.read().await.len() as i64)
    }
}
