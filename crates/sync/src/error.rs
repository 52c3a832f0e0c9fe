//! Error taxonomy for the sync surface.
//!
//! Validation failures are detected at the boundary before any persistence
//! call; persistence failures are caught at the call site and wrapped here.
//! Raw sqlx errors never reach a response body beyond the short message the
//! transport adapters choose to include.

use axum::http::StatusCode;
use thiserror::Error;

use crate::db::RepositoryError;

/// Message used when a sync payload lacks a required field.
pub const MISSING_FIELDS: &str = "missing required fields: id and name";

/// Failure of a dish sync call.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Required field missing; never reaches persistence.
    #[error("validation error: {0}")]
    Validation(&'static str),

    /// Connectivity or constraint failure from the store.
    #[error("persistence error: {0}")]
    Database(#[from] RepositoryError),
}

impl SyncError {
    /// HTTP status the transport adapters map this failure to.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Capture server-side failures to Sentry and the log.
    ///
    /// Validation failures are the client's problem and are not reported.
    pub fn report(&self) {
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "dish sync failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SyncError::Validation(MISSING_FIELDS).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SyncError::Database(RepositoryError::Conflict("dup".to_owned())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display() {
        let err = SyncError::Validation(MISSING_FIELDS);
        assert_eq!(
            err.to_string(),
            "validation error: missing required fields: id and name"
        );
    }
}
