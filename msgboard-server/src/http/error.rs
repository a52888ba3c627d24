//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses: `{"error": kind, "message": text}`.
//! Every client-side failure is a 400, including a missing message.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;
use crate::service::ServiceError;

/// Body text for a path id that is not a UUID
pub const INVALID_ID_MESSAGE: &str = "Invalid ID";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Field validation failed (400)
    Validation(ValidationError),

    /// Path id is not a valid UUID (400)
    InvalidId,

    /// Body or query could not be decoded (400)
    MalformedRequest { message: String },

    /// No message with that id (400)
    NotFound { message: String },

    /// Update body id differs from the path id (400)
    IdMismatch { message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(e) => json!({
                "error": "validation_error",
                "message": e.to_string(),
                "field": e.field(),
            }),
            Self::InvalidId => json!({
                "error": "invalid_id",
                "message": INVALID_ID_MESSAGE,
            }),
            Self::MalformedRequest { message } => json!({
                "error": "malformed_request",
                "message": message,
            }),
            Self::NotFound { message } => json!({
                "error": "not_found",
                "message": message,
            }),
            Self::IdMismatch { message } => json!({
                "error": "id_mismatch",
                "message": message,
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred",
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::NotFound {
                message: e.to_string(),
            },
            ServiceError::IdMismatch { .. } => Self::IdMismatch {
                message: e.to_string(),
            },
            ServiceError::Validation(v) => Self::Validation(v),
            ServiceError::Store(db) => Self::Database(db),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::MalformedRequest {
            message: rejection.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use uuid::Uuid;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "username" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["field"], "username");
    }

    #[tokio::test]
    async fn not_found_is_400_with_message() {
        let err = ApiError::from(ServiceError::NotFound(Uuid::new_v4()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "Message not found");
    }

    #[tokio::test]
    async fn id_mismatch_is_400_with_message() {
        let err = ApiError::from(ServiceError::IdMismatch {
            expected: Uuid::new_v4(),
            actual: None,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "id_mismatch");
        assert_eq!(
            body["message"],
            "Updated message does not have the correct ID"
        );
    }

    #[tokio::test]
    async fn invalid_id_is_400() {
        let response = ApiError::InvalidId.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid ID");
    }

    #[tokio::test]
    async fn database_error_is_500_and_generic() {
        let err = ApiError::from(ServiceError::Store(DbError::Sqlx(sqlx::Error::PoolTimedOut)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "an internal error occurred");
    }
}
