//! Moderation handler

use axum::{Json, extract::State};
use domain::{DeviceId, SearchQuery, Verdict};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// Moderation request body
///
/// `query` is kept as a raw JSON value so the handler can distinguish
/// "missing" from "present but not a string" and answer 400 for both,
/// instead of the extractor's generic unprocessable-entity rejection.
#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    /// The search query to classify
    #[serde(default)]
    pub query: Option<serde_json::Value>,
    /// Identifier of the submitting device
    #[serde(default, rename = "deviceId")]
    pub device_id: Option<String>,
}

/// Moderation response body
#[derive(Debug, Serialize)]
pub struct ModerateResponse {
    /// The computed verdict
    pub action: Verdict,
}

/// Handle a moderation request
#[instrument(skip(state, request))]
pub async fn moderate(
    State(state): State<AppState>,
    Json(request): Json<ModerateRequest>,
) -> Result<Json<ModerateResponse>, ApiError> {
    let query_text = request
        .query
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| ApiError::BadRequest("Valid 'query' required".to_string()))?;

    let query = SearchQuery::new(query_text)
        .map_err(|_| ApiError::BadRequest("Valid 'query' required".to_string()))?;
    let device_id = DeviceId::from_optional(request.device_id.as_deref());

    info!(device = %device_id, query = %query, "Processing moderation request");

    let action = state.moderation.classify(&query).await;

    info!(query = %query, verdict = %action, "Verdict computed");

    // Detached write; the response does not wait for it.
    let _audit_task = state.audit.record(&device_id, &query, action);

    Ok(Json(ModerateResponse { action }))
}
