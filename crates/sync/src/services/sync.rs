//! Dish synchronization service.
//!
//! The single upsert operation behind both `/minimal` transports. Keeping it
//! in one place means the two cannot drift apart on validation or
//! default-filling rules.

use sqlx::PgPool;

use comanda_core::DishId;

use crate::db::{DishRepository, RepositoryError};
use crate::error::{MISSING_FIELDS, SyncError};
use crate::models::dish::{DishChanges, NewDish, SyncPayload};

/// Longest image prefix worth logging; the rest is elided.
const IMAGE_LOG_PREFIX: usize = 32;

/// Result of a successful sync call.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// `true` when the call created the dish, `false` when it updated one.
    pub created: bool,
    /// The dish id, echoed so client sync loops can match up retries.
    pub id: DishId,
}

/// Dish synchronization service.
///
/// Insert-if-absent, update-if-present, keyed by the externally supplied
/// dish id.
pub struct DishSyncService<'a> {
    dishes: DishRepository<'a>,
}

impl<'a> DishSyncService<'a> {
    /// Create a new sync service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            dishes: DishRepository::new(pool),
        }
    }

    /// Apply one sync call: create the dish if its id is unseen, update it
    /// otherwise.
    ///
    /// Exactly one row is written per successful call. A create racing
    /// another first-time sync for the same id is retried as an update once;
    /// the caller never observes the transient duplicate-key condition.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Validation` if `id` or `name` is missing; no
    /// persistence call is made in that case. Returns `SyncError::Database`
    /// for store failures; the operation is not retried internally.
    pub async fn sync_dish(&self, payload: SyncPayload) -> Result<SyncOutcome, SyncError> {
        log_payload(&payload);

        let (id, name) = validate(payload.id.clone(), payload.name.as_deref())?;

        if self.dishes.get(&id).await?.is_some() {
            self.dishes.update(&id, &changes(name, &payload)).await?;
            tracing::info!(id = %id, "dish updated");
            return Ok(SyncOutcome { created: false, id });
        }

        let new = NewDish {
            id: id.clone(),
            name: name.clone(),
            price: payload.price.unwrap_or_default(),
            is_available: payload.is_available.unwrap_or(true),
            image: payload.image.clone(),
            description: payload.description.clone(),
        };

        match self.dishes.insert(&new).await {
            Ok(_) => {
                tracing::info!(id = %id, "dish created");
                Ok(SyncOutcome { created: true, id })
            }
            Err(RepositoryError::Conflict(_)) => {
                // Lost the first-insert race; the row exists now, so apply
                // this call as the update it effectively is.
                tracing::warn!(id = %id, "create raced an existing row, retrying as update");
                self.dishes.update(&id, &changes(name, &payload)).await?;
                Ok(SyncOutcome { created: false, id })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Check the two required fields; trims the name.
fn validate(
    id: Option<DishId>,
    name: Option<&str>,
) -> Result<(DishId, String), SyncError> {
    let id = id.ok_or(SyncError::Validation(MISSING_FIELDS))?;
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(SyncError::Validation(MISSING_FIELDS))?;
    Ok((id, name.to_owned()))
}

/// Build the partial-update changeset from a payload.
fn changes(name: String, payload: &SyncPayload) -> DishChanges {
    DishChanges {
        name,
        price: payload.price,
        is_available: payload.is_available,
        image: payload.image.clone(),
        description: payload.description.clone(),
    }
}

/// Log the received payload, eliding image data.
///
/// Image fields routinely carry whole base64 data-URLs; logging them in full
/// would bloat the log and leak binary noise into it.
fn log_payload(payload: &SyncPayload) {
    tracing::info!(
        id = ?payload.id,
        name = ?payload.name,
        price = ?payload.price,
        is_available = ?payload.is_available,
        image = ?payload.image.as_deref().map(elide_image),
        "sync payload received"
    );
}

/// Truncate an image value for logging.
fn elide_image(image: &str) -> String {
    if image.len() <= IMAGE_LOG_PREFIX {
        return image.to_owned();
    }
    let prefix: String = image.chars().take(IMAGE_LOG_PREFIX).collect();
    format!("{prefix}… ({} bytes)", image.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload(id: Option<&str>, name: Option<&str>) -> SyncPayload {
        SyncPayload {
            id: id.map(|raw| DishId::parse(raw).unwrap()),
            name: name.map(ToOwned::to_owned),
            ..SyncPayload::default()
        }
    }

    #[test]
    fn validate_requires_id() {
        let p = payload(None, Some("Taco"));
        let err = validate(p.id, p.name.as_deref()).unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[test]
    fn validate_requires_name() {
        let p = payload(Some("42"), None);
        let err = validate(p.id, p.name.as_deref()).unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let p = payload(Some("42"), Some("   "));
        let err = validate(p.id, p.name.as_deref()).unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[test]
    fn validate_trims_name() {
        let p = payload(Some("42"), Some("  Taco  "));
        let (id, name) = validate(p.id, p.name.as_deref()).unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(name, "Taco");
    }

    #[test]
    fn elide_image_keeps_short_values() {
        assert_eq!(elide_image("logo.png"), "logo.png");
    }

    #[test]
    fn elide_image_truncates_data_urls() {
        let image = format!("data:image/png;base64,{}", "A".repeat(500));
        let elided = elide_image(&image);
        assert!(elided.len() < 64);
        assert!(elided.starts_with("data:image/png;base64,"));
        assert!(elided.contains("522 bytes"));
    }
}
