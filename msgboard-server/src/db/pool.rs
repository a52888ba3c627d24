//! PostgreSQL pool for the message store
//!
//! Handlers hold a connection only for the duration of one statement, so the
//! pool stays small. `msgboard serve --max-connections` sizes it for the
//! server; `msgboard migrate` runs with the default.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connections opened by `create_pool`.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection before failing with a
/// database error (surfaced to clients as 500).
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect with [`DEFAULT_MAX_CONNECTIONS`].
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/msgboard").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect with an explicit connection cap. A cap of 0 is raised to 1.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let options = pool_options(max_connections);
    tracing::debug!(
        max_connections = options.get_max_connections(),
        "connecting to message store"
    );
    options.connect(database_url).await
}

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
}
