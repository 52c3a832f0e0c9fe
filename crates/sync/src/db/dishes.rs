//! Dish repository for database operations.
//!
//! Queries are runtime-checked (`sqlx::query_as` with `FromRow` rows) so the
//! crate builds without a live database; the schema lives in
//! `crates/sync/migrations/`.

use sqlx::PgPool;

use comanda_core::DishId;

use super::RepositoryError;
use crate::models::dish::{Dish, DishChanges, NewDish};

const DISH_COLUMNS: &str = "id, name, price, is_available, image, description, created_at, updated_at";

/// Repository for dish database operations.
pub struct DishRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DishRepository<'a> {
    /// Create a new dish repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a dish by its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &DishId) -> Result<Option<Dish>, RepositoryError> {
        let query = format!("SELECT {DISH_COLUMNS} FROM dish WHERE id = $1");
        let dish = sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(dish)
    }

    /// Insert a new dish.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a dish with the same id already
    /// exists (a concurrent sync call won the insert).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, new: &NewDish) -> Result<Dish, RepositoryError> {
        let query = format!(
            "INSERT INTO dish (id, name, price, is_available, image, description) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {DISH_COLUMNS}"
        );
        let dish = sqlx::query_as::<_, Dish>(&query)
            .bind(&new.id)
            .bind(&new.name)
            .bind(new.price)
            .bind(new.is_available)
            .bind(new.image.as_deref())
            .bind(new.description.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict(format!("dish {} already exists", new.id));
                }
                RepositoryError::Database(e)
            })?;

        Ok(dish)
    }

    /// Apply changes to an existing dish.
    ///
    /// Fields the changeset does not carry keep their stored value;
    /// `updated_at` is always refreshed and `created_at` is never touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails or the dish
    /// does not exist.
    pub async fn update(&self, id: &DishId, changes: &DishChanges) -> Result<Dish, RepositoryError> {
        let query = format!(
            "UPDATE dish \
             SET name = $2, \
                 price = COALESCE($3, price), \
                 is_available = COALESCE($4, is_available), \
                 image = COALESCE($5, image), \
                 description = COALESCE($6, description), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {DISH_COLUMNS}"
        );
        let dish = sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.price)
            .bind(changes.is_available)
            .bind(changes.image.as_deref())
            .bind(changes.description.as_deref())
            .fetch_one(self.pool)
            .await?;

        Ok(dish)
    }
}
