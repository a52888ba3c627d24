//! msgboard-server: message board HTTP backend
//!
//! Three layers, composed top-down:
//! - [`http`]: axum routes, extractors and error-to-status mapping
//! - [`service`]: validation and orchestration ([`MessageService`])
//! - [`db`]: the [`MessageStore`] contract with PostgreSQL and in-memory stores

pub mod db;
pub mod http;
pub mod models;
pub mod service;

pub use db::{DbError, InMemoryMessageStore, MessageStore, PgMessageStore};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use service::{MessageService, MessageUpdate, NewMessage, ServiceError, ServiceResult};
