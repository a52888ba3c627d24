//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use msgboard_server::db::{create_pool, migrations};
use msgboard_server::{MessageStore, PgMessageStore};

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Apply migrations and report how many messages are stored
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args.database.url()?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let count = PgMessageStore::new(pool)
        .count()
        .await
        .context("Failed to count messages")?;

    println!("Migrations applied; {count} message(s) stored");
    Ok(())
}
