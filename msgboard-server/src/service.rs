//! Message service - validation and orchestration between HTTP and storage
//!
//! Every operation is a single store call wrapped in presence checks.
//! Failures are typed ([`ServiceError`]); mapping them to status codes is
//! left to the HTTP layer.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::{DbError, MessageStore};
use crate::models::{Message, MessageContent, Page, PageRequest, Username, ValidationError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Message not found")]
    NotFound(Uuid),

    #[error("Updated message does not have the correct ID")]
    IdMismatch { expected: Uuid, actual: Option<Uuid> },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] DbError),
}

/// Fields accepted when registering a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub username: String,
    pub content: String,
}

impl NewMessage {
    pub fn new(username: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            content: content.into(),
        }
    }
}

/// Fields accepted when updating a message. `id` must match the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageUpdate {
    pub id: Option<Uuid>,
    pub content: String,
}

impl MessageUpdate {
    pub fn new(id: Option<Uuid>, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}

#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
}

impl MessageService {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Validate and store a new message under a freshly generated id.
    pub async fn register(&self, new_message: NewMessage) -> ServiceResult<Message> {
        let username = Username::new(&new_message.username)?;
        let content = MessageContent::new(&new_message.content)?;

        let message = Message::new(Uuid::new_v4(), username, content, Utc::now());
        let saved = self.store.save(&message).await?;

        tracing::info!(id = %saved.id(), username = saved.username(), "registered message");
        Ok(saved)
    }

    /// Fetch a message, failing with [`ServiceError::NotFound`] when absent.
    pub async fn get(&self, id: Uuid) -> ServiceResult<Message> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Replace the content of an existing message.
    ///
    /// Presence is checked first, then the id carried by the update, then the
    /// new content. Username and creation time keep their stored values.
    pub async fn update(&self, id: Uuid, update: MessageUpdate) -> ServiceResult<Message> {
        let mut message = self.get(id).await?;

        if update.id != Some(message.id()) {
            return Err(ServiceError::IdMismatch {
                expected: id,
                actual: update.id,
            });
        }

        let content = MessageContent::new(&update.content)?;
        message.replace_content(content, Utc::now());
        let saved = self.store.save(&message).await?;

        tracing::info!(%id, "updated message");
        Ok(saved)
    }

    /// Delete an existing message.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<bool> {
        self.get(id).await?;
        self.store.delete_by_id(id).await?;

        tracing::info!(%id, "deleted message");
        Ok(true)
    }

    /// Page through messages, newest first.
    pub async fn list(&self, page: PageRequest) -> ServiceResult<Page<Message>> {
        Ok(self.store.list_ordered_by_created_at_desc(page).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryMessageStore;
    use chrono::SubsecRound;

    fn service() -> MessageService {
        MessageService::new(Arc::new(InMemoryMessageStore::new()))
    }

    async fn hello(service: &MessageService) -> Message {
        service
            .register(NewMessage::new("John", "Hello, World!"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn register_assigns_id_and_defaults() {
        let service = service();
        let before = Utc::now();

        let first = hello(&service).await;
        let second = hello(&service).await;

        assert_ne!(first.id(), second.id());
        assert_eq!(first.id().get_version_num(), 4);
        assert_eq!(first.like_count(), 0);
        assert_eq!(first.username(), "John");
        assert_eq!(first.content(), "Hello, World!");
        assert_eq!(first.created_at(), first.updated_at());

        // Truncated to microseconds: no earlier than `before` truncated
        assert!(first.created_at() >= before.trunc_subsecs(6));
        assert!(before - first.created_at() < chrono::Duration::microseconds(1));
    }

    #[tokio::test]
    async fn register_rejects_empty_fields() {
        let service = service();

        let err = service
            .register(NewMessage::new("", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::Empty { field: "username" })
        ));

        let err = service
            .register(NewMessage::new("John", "  "))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::Empty { field: "content" })
        ));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_everywhere() {
        let service = service();
        let id = Uuid::new_v4();

        let err = service.get(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(missing) if missing == id));
        assert_eq!(err.to_string(), "Message not found");

        let err = service
            .update(id, MessageUpdate::new(Some(id), "changed"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Message not found");

        let err = service.delete(id).await.unwrap_err();
        assert_eq!(err.to_string(), "Message not found");
    }

    #[tokio::test]
    async fn update_rejects_mismatched_id() {
        let service = service();
        let message = hello(&service).await;

        for body_id in [Some(Uuid::new_v4()), None] {
            // Content is irrelevant once the ids disagree, even if invalid
            for content in ["changed", ""] {
                let err = service
                    .update(message.id(), MessageUpdate::new(body_id, content))
                    .await
                    .unwrap_err();
                assert!(matches!(err, ServiceError::IdMismatch { .. }));
                assert_eq!(
                    err.to_string(),
                    "Updated message does not have the correct ID"
                );
            }
        }

        let stored = service.get(message.id()).await.unwrap();
        assert_eq!(stored.content(), "Hello, World!");
    }

    #[tokio::test]
    async fn update_replaces_content_only() {
        let service = service();
        let message = hello(&service).await;

        let updated = service
            .update(
                message.id(),
                MessageUpdate::new(Some(message.id()), "Hello, changing this message content!"),
            )
            .await
            .unwrap();

        assert_eq!(updated.id(), message.id());
        assert_eq!(updated.username(), message.username());
        assert_eq!(updated.created_at(), message.created_at());
        assert_eq!(updated.like_count(), 0);
        assert_eq!(updated.content(), "Hello, changing this message content!");
        assert!(updated.updated_at() >= message.updated_at());

        let stored = service.get(message.id()).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_validates_new_content() {
        let service = service();
        let message = hello(&service).await;

        let err = service
            .update(message.id(), MessageUpdate::new(Some(message.id()), ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_removes_message() {
        let service = service();
        let message = hello(&service).await;

        assert!(service.delete(message.id()).await.unwrap());

        let err = service.get(message.id()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let service = service();
        let older = hello(&service).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let newer = service
            .register(NewMessage::new("Jane", "Second"))
            .await
            .unwrap();

        let page = service.list(PageRequest::default()).await.unwrap();

        assert_eq!(page.total, 2);
        assert!(page.items.len() <= 10);
        assert_eq!(page.items[0].id(), newer.id());
        assert_eq!(page.items[1].id(), older.id());
    }
}
