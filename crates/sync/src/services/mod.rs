//! Service layer for the sync surface.

pub mod sync;

pub use sync::{DishSyncService, SyncOutcome};
