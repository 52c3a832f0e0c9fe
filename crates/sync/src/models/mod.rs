//! Domain types for the sync service.

pub mod dish;

pub use dish::{Dish, DishChanges, NewDish, SyncPayload};
