//! Message endpoints
//!
//! - `POST   /messages`        register
//! - `GET    /messages`        list (page, size)
//! - `GET    /messages/{id}`   read
//! - `PUT    /messages/{id}`   update content
//! - `DELETE /messages/{id}`   delete

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidQuery, ValidUuid};
use crate::http::server::AppState;
use crate::models::{Message, PageParams, PageRequest, PageResponse};
use crate::service::{MessageUpdate, NewMessage};

/// Body returned by a successful delete
pub const DELETED_BODY: &str = "Message deleted";

/// Create message request. Any id, timestamps or like count sent along are ignored.
#[derive(Deserialize)]
pub struct CreateMessageRequest {
    pub username: String,
    pub content: String,
}

/// Update message request. Only `id` and `content` are read.
#[derive(Deserialize)]
pub struct UpdateMessageRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub content: String,
}

/// Message response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub like_count: i32,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id(),
            username: m.username().to_owned(),
            content: m.content().to_owned(),
            created_at: format_timestamp(m.created_at()),
            updated_at: format_timestamp(m.updated_at()),
            like_count: m.like_count(),
        }
    }
}

/// Render as `yyyy-MM-dd HH:mm:ss.SSSSS` (five fractional digits).
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    format!(
        "{}.{:05}",
        ts.format("%Y-%m-%d %H:%M:%S"),
        ts.timestamp_subsec_micros() / 10
    )
}

/// POST /messages - register a new message
async fn create_message(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let message = state
        .messages
        .register(NewMessage::new(req.username, req.content))
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// GET /messages/{id} - get a single message
async fn get_message(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = state.messages.get(id).await?;
    Ok(Json(MessageResponse::from(message)))
}

/// PUT /messages/{id} - replace a message's content
async fn update_message(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    ValidJson(req): ValidJson<UpdateMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let message = state
        .messages
        .update(id, MessageUpdate::new(req.id, req.content))
        .await?;

    Ok((StatusCode::ACCEPTED, Json(MessageResponse::from(message))))
}

/// DELETE /messages/{id} - delete a message
async fn delete_message(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<(StatusCode, &'static str), ApiError> {
    state.messages.delete(id).await?;
    Ok((StatusCode::OK, DELETED_BODY))
}

/// GET /messages?page&size - list messages, newest first
async fn list_messages(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<PageParams>,
) -> Result<Json<PageResponse<MessageResponse>>, ApiError> {
    let page = PageRequest::from(params);
    let result = state.messages.list(page).await?;

    tracing::debug!(page = page.page, size = page.size, total = result.total, "listed messages");
    Ok(Json(PageResponse::from(result.map(MessageResponse::from))))
}

/// Message routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/messages", get(list_messages).post(create_message))
        .route(
            "/messages/{id}",
            get(get_message).put(update_message).delete(delete_message),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_has_five_fraction_digits() {
        let ts = Utc
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .unwrap()
            .checked_add_signed(chrono::Duration::microseconds(123_456))
            .unwrap();
        assert_eq!(format_timestamp(ts), "2024-03-09 07:05:01.12345");

        let whole = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_timestamp(whole), "2024-03-09 07:05:01.00000");
    }

    #[test]
    fn update_request_ignores_extra_fields() {
        let req: UpdateMessageRequest = serde_json::from_str(
            r#"{"username": "Mallory", "content": "new", "likeCount": 99}"#,
        )
        .unwrap();
        assert_eq!(req.id, None);
        assert_eq!(req.content, "new");
    }
}
