//! Seed the dish catalog with sample data.
//!
//! Intended for local development: gives the front-end something to render
//! before the first real sync call arrives. Existing rows are left alone, so
//! re-running the command is safe.

use rust_decimal::Decimal;
use sqlx::PgPool;

use comanda_core::{DishId, Price};

/// Sample catalog: id, name, price, description.
const SAMPLE_DISHES: &[(&str, &str, &str, &str)] = &[
    (
        "1",
        "Tacos al pastor",
        "9.50",
        "Tres tacos con piña, cebolla y cilantro",
    ),
    (
        "2",
        "Quesadilla de flor de calabaza",
        "7.00",
        "Tortilla hecha a mano con queso oaxaca",
    ),
    ("3", "Sopa de tortilla", "6.50", "Con aguacate y crema"),
    ("4", "Agua de horchata", "3.00", "Vaso grande"),
    (
        "5",
        "Flan de la casa",
        "4.75",
        "Receta tradicional con caramelo",
    ),
];

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: SYNC_DATABASE_URL")]
    MissingEnvVar(#[from] std::env::VarError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid sample dish: {0}")]
    InvalidSample(String),
}

/// Seed the dish catalog with sample dishes.
///
/// Rows that already exist are skipped (`ON CONFLICT DO NOTHING`).
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing or a write fails.
pub async fn dishes() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url()?;

    tracing::info!("Connecting to sync database...");
    let pool = PgPool::connect(&database_url).await?;

    let mut inserted = 0_u64;
    for (raw_id, name, raw_price, description) in SAMPLE_DISHES {
        let id =
            DishId::parse(raw_id).map_err(|e| SeedError::InvalidSample(e.to_string()))?;
        let price = raw_price
            .parse::<Decimal>()
            .map(Price::new)
            .map_err(|e| SeedError::InvalidSample(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO dish (id, name, price, description) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&id)
        .bind(*name)
        .bind(price)
        .bind(*description)
        .execute(&pool)
        .await?;

        inserted += result.rows_affected();
    }

    let total = SAMPLE_DISHES.len() as u64;
    tracing::info!(
        "Seeded {inserted} dishes ({} already present)",
        total - inserted
    );
    Ok(())
}
