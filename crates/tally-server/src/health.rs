//! Liveness endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tally_core::store::ScoreStore;

use crate::error::ApiError;

/// `GET /health` — probe the backing instance; `503` when it is unreachable.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: ScoreStore,
{
  store.ping().await.map_err(ApiError::from_store)?;
  Ok(Json(json!({ "status": "ok" })))
}
