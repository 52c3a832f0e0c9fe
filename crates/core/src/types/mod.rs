//! Core types for Comanda.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::{DishId, DishIdError};
pub use price::Price;
