//! Schema migrations
//!
//! Migrations are read from a directory at runtime so the binary does not need
//! the SQL files at compile time.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::Path;
use tracing::info;

/// Apply every pending migration found in `dir`
pub async fn run_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> Result<(), MigrateError> {
    let dir = dir.as_ref();
    let migrator = Migrator::new(dir).await?;
    info!(
        dir = %dir.display(),
        available = migrator.iter().count(),
        "Applying database migrations"
    );
    migrator.run(pool).await
}
