//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! comanda-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SYNC_DATABASE_URL` - `PostgreSQL` connection string for the sync
//!   database (falls back to `DATABASE_URL`)
//!
//! Migration files live in `crates/sync/migrations/` and are embedded at
//! compile time via `sqlx::migrate!`.

use sqlx::PgPool;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: SYNC_DATABASE_URL")]
    MissingEnvVar(#[from] std::env::VarError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run sync database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing, the connection
/// fails, or a migration cannot be applied.
pub async fn sync() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url()?;

    tracing::info!("Connecting to sync database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running sync migrations...");
    sqlx::migrate!("../sync/migrations").run(&pool).await?;

    tracing::info!("Sync migrations complete!");
    Ok(())
}
