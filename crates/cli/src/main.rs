//! Comanda CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run sync database migrations
//! comanda-cli migrate
//!
//! # Seed the dish catalog with sample data
//! comanda-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the dish catalog with sample dishes

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "comanda-cli")]
#[command(author, version, about = "Comanda CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run sync database migrations
    Migrate,
    /// Seed the dish catalog with sample dishes
    Seed,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::sync().await?,
        Commands::Seed => commands::seed::dishes().await?,
    }
    Ok(())
}
