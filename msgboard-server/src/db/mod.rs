//! Database layer - connection pool, schema and message stores
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Upserts via ON CONFLICT - no check-then-insert
//! - Paged listing returns items and total in a single query

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
