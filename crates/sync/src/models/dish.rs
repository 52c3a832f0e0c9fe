//! Dish domain types.
//!
//! `Dish` is the persisted catalog row; `SyncPayload` is the normalized input
//! a sync call carries before validation, and `NewDish`/`DishChanges` are the
//! validated write shapes handed to the repository.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use comanda_core::{DishId, Price};

/// A persisted dish row.
#[derive(Debug, Clone, FromRow)]
pub struct Dish {
    /// Externally supplied natural key, immutable once assigned.
    pub id: DishId,
    /// Display name.
    pub name: String,
    /// Price; zero when the creating sync call carried none.
    pub price: Price,
    /// Whether the dish is currently orderable.
    pub is_available: bool,
    /// Image data-URL or remote URL, if any.
    pub image: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// When the dish was first synchronized.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful sync write.
    pub updated_at: DateTime<Utc>,
}

/// Normalized sync input before validation.
///
/// Both transports produce this shape; fields the payload did not carry are
/// `None`. Unknown payload fields are dropped before this point.
#[derive(Debug, Clone, Default)]
pub struct SyncPayload {
    pub id: Option<DishId>,
    pub name: Option<String>,
    pub price: Option<Price>,
    pub is_available: Option<bool>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// A validated dish ready for insertion, defaults applied.
#[derive(Debug, Clone)]
pub struct NewDish {
    pub id: DishId,
    pub name: String,
    pub price: Price,
    pub is_available: bool,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Field changes to apply to an existing dish.
///
/// `name` is always present (a sync call without it is rejected up front);
/// the remaining fields only overwrite the stored value when supplied.
#[derive(Debug, Clone)]
pub struct DishChanges {
    pub name: String,
    pub price: Option<Price>,
    pub is_available: Option<bool>,
    pub image: Option<String>,
    pub description: Option<String>,
}
