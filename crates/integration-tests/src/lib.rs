//! Integration tests for Comanda.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations, then start the service
//! cargo run -p comanda-cli -- migrate
//! cargo run -p comanda-sync
//!
//! # Run the end-to-end suite
//! cargo test -p comanda-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `SYNC_BASE_URL` - Base URL of the running service (default:
//!   `http://localhost:3000`)
//! - `SYNC_DATABASE_URL` - `PostgreSQL` connection string, used to verify
//!   persisted rows directly (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Shared context for end-to-end tests: an HTTP client pointed at a running
/// sync service plus a direct database connection to verify persisted rows.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: PgPool,
}

impl TestContext {
    /// Connect to the service and database named by the environment.
    ///
    /// # Panics
    ///
    /// Panics if the database URL is missing or unreachable; the end-to-end
    /// suite cannot run without it.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("SYNC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let database_url = std::env::var("SYNC_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .expect("SYNC_DATABASE_URL must be set for integration tests");

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&database_url)
            .await
            .expect("Failed to connect to sync database");

        Self {
            client: Client::new(),
            base_url,
            pool,
        }
    }

    /// Build a full URL for a service path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Number of persisted rows for a dish id.
    ///
    /// # Panics
    ///
    /// Panics if the count query fails.
    pub async fn dish_count(&self, id: &str) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dish WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count dishes")
    }
}
