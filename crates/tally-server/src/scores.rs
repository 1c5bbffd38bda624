//! Handlers for score submission and reads.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/scores` | Body: `{"player_name":"alice","player_score":10}` |
//! | `GET`  | `/scores/top` | Optional `?limit=10&order=desc\|asc` |
//! | `GET`  | `/players/:player_name/scores` | History, oldest first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use tally_core::{
  record::{NewScore, ScoreRecord},
  store::{ScoreOrder, ScoreStore},
};

use crate::error::ApiError;

// ─── Submit ──────────────────────────────────────────────────────────────────

/// `POST /scores` — persist one submission, `201` with the stored record.
///
/// `posted_time` may be supplied in the body; when omitted the store assigns
/// the insertion instant.
pub async fn submit<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewScore>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ScoreStore,
{
  let record = store.submit(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Leaderboard ─────────────────────────────────────────────────────────────

fn default_limit() -> usize { 10 }

#[derive(Debug, Deserialize)]
pub struct TopParams {
  #[serde(default = "default_limit")]
  pub limit: usize,
  #[serde(default)]
  pub order: ScoreOrder,
}

/// `GET /scores/top[?limit=<n>&order=desc|asc]`
pub async fn top<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<TopParams>,
) -> Result<Json<Vec<ScoreRecord>>, ApiError>
where
  S: ScoreStore,
{
  let records = store
    .list_top(params.limit, params.order)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(records))
}

// ─── Per-player history ──────────────────────────────────────────────────────

/// `GET /players/:player_name/scores` — all submissions for one player,
/// ascending by `posted_time`. Unknown players yield an empty array.
pub async fn by_player<S>(
  State(store): State<Arc<S>>,
  Path(player_name): Path<String>,
) -> Result<Json<Vec<ScoreRecord>>, ApiError>
where
  S: ScoreStore,
{
  let records = store
    .list_by_player(&player_name)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(records))
}
