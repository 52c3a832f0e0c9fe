//! `/minimal` dish sync transports.
//!
//! Two wire shapes, one operation: the GET variant reads `id`/`name`/`price`
//! from the query string (the low-friction path for callers whose JSON
//! requests are blocked), the POST variant reads a JSON body that may carry
//! the full recognized field set. Both feed [`DishSyncService::sync_dish`],
//! so neither can grow its own validation or default-filling rules.
//!
//! Unknown body fields are ignored, never persisted; the recognized optional
//! fields are `price`, `isAvailable`, `image` and `description`.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, Serialize};

use comanda_core::{DishId, Price};

use crate::error::SyncError;
use crate::models::dish::SyncPayload;
use crate::services::sync::{DishSyncService, SyncOutcome};
use crate::state::AppState;

/// User-facing message for a payload missing `id` or `name`.
const MSG_INCOMPLETE: &str = "Datos de plato incompletos";
/// User-facing message for a persistence failure.
const MSG_SYNC_FAILED: &str = "No se pudo sincronizar el plato";
/// Success messages, by outcome.
const MSG_CREATED: &str = "Plato creado";
const MSG_UPDATED: &str = "Plato actualizado";

// ============================================================================
// GET /minimal
// ============================================================================

/// Query parameters of the emergency GET transport.
#[derive(Debug, Deserialize)]
pub struct MinimalQuery {
    id: Option<String>,
    name: Option<String>,
    price: Option<Price>,
}

/// Success response of the GET transport.
#[derive(Debug, Serialize)]
pub struct MinimalGetResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: DishId,
}

/// Failure response of the GET transport.
#[derive(Debug, Serialize)]
pub struct MinimalGetError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Sync a dish from query parameters.
///
/// GET /minimal?id=42&name=Taco&price=9.5
///
/// Returns 201 when the call created the dish, 200 when it updated one.
pub async fn minimal_get(
    State(state): State<AppState>,
    Query(query): Query<MinimalQuery>,
) -> Response {
    let payload = SyncPayload {
        id: query.id.as_deref().and_then(|raw| DishId::parse(raw).ok()),
        name: query.name,
        price: query.price,
        ..SyncPayload::default()
    };

    match DishSyncService::new(state.pool()).sync_dish(payload).await {
        Ok(outcome) => {
            let status = if outcome.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            let body = MinimalGetResponse {
                success: true,
                message: outcome_message(&outcome),
                id: outcome.id,
            };
            (status, Json(body)).into_response()
        }
        Err(err) => {
            err.report();
            let body = match &err {
                SyncError::Validation(msg) => MinimalGetError {
                    error: (*msg).to_owned(),
                    details: None,
                },
                SyncError::Database(db) => MinimalGetError {
                    error: MSG_SYNC_FAILED.to_owned(),
                    details: Some(db.to_string()),
                },
            };
            (err.status_code(), Json(body)).into_response()
        }
    }
}

// ============================================================================
// POST /minimal
// ============================================================================

/// JSON body of the POST transport.
///
/// Clients send `id` as a string or a number; anything else is treated as
/// absent and rejected by the shared validation, exactly as on the GET path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalBody {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<DishId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    price: Option<Price>,
    #[serde(default)]
    is_available: Option<bool>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Success response of the POST transport.
#[derive(Debug, Serialize)]
pub struct MinimalPostResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: DishRef,
}

/// Id echo carried in POST success responses.
#[derive(Debug, Serialize)]
pub struct DishRef {
    pub id: DishId,
}

/// Failure response of the POST transport.
#[derive(Debug, Serialize)]
pub struct MinimalPostError {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sync a dish from a JSON body.
///
/// POST /minimal
pub async fn minimal_post(State(state): State<AppState>, Json(body): Json<MinimalBody>) -> Response {
    let payload = SyncPayload {
        id: body.id,
        name: body.name,
        price: body.price,
        is_available: body.is_available,
        image: body.image,
        description: body.description,
    };

    match DishSyncService::new(state.pool()).sync_dish(payload).await {
        Ok(outcome) => {
            let body = MinimalPostResponse {
                success: true,
                message: outcome_message(&outcome),
                data: DishRef { id: outcome.id },
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            err.report();
            let body = match &err {
                SyncError::Validation(_) => MinimalPostError {
                    success: false,
                    message: MSG_INCOMPLETE,
                    error: None,
                },
                SyncError::Database(db) => MinimalPostError {
                    success: false,
                    message: MSG_SYNC_FAILED,
                    error: Some(db.to_string()),
                },
            };
            (err.status_code(), Json(body)).into_response()
        }
    }
}

/// Success message for a sync outcome.
const fn outcome_message(outcome: &SyncOutcome) -> &'static str {
    if outcome.created { MSG_CREATED } else { MSG_UPDATED }
}

/// Deserialize a dish id from a string or a number, treating anything else
/// (including an empty string) as absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<DishId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value::<DishId>(value).ok()))
}
