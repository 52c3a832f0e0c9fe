//! CLI subcommands.

pub mod migrate;
pub mod seed;

/// Resolve the sync database URL from the environment.
///
/// Prefers `SYNC_DATABASE_URL`, falling back to the generic `DATABASE_URL`
/// (set by Fly.io postgres attach).
fn database_url() -> Result<String, std::env::VarError> {
    std::env::var("SYNC_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL"))
}
