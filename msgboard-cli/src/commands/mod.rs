//! Command implementations for the msgboard CLI

pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Database connection arguments shared by commands
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// Database URL (overrides environment / .env)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl DatabaseArgs {
    pub fn url(&self) -> Result<String> {
        self.database_url
            .clone()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")
    }
}
