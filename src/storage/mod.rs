//! # Storage and Persistence
//!
//! Database connectivity and persistence layer for the Rollcall user
//! directory.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use crate::config::DatabaseConfig;

pub use migrations::{run_migrations as run_db_migrations, validate_migrations};
pub use pool::{create_pool, DbPool};
pub use repositories::{SqlxUserRepository, UserFilter, UserRepository};

use crate::errors::{Error, Result};

/// Run database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    migrations::run_migrations(pool).await
}

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| Error::database(e, "Database connectivity check failed"))?;

    Ok(())
}
