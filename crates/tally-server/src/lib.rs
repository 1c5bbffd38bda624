//! JSON HTTP serving layer for the tally score store.
//!
//! Exposes an axum [`Router`] backed by any
//! [`tally_core::store::ScoreStore`]. The router serves exactly one
//! instance; production and test deployments run one process each, pointed
//! at their own endpoint by configuration.

pub mod error;
pub mod health;
pub mod scores;

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use tally_core::store::ScoreStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`:
///
/// ```toml
/// host = "127.0.0.1"
/// port = 8080
///
/// [instances.production]
/// store_path = "/var/lib/tally/production.db"
///
/// [instances.test]
/// store_path = "/var/lib/tally/test.db"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:      String,
  pub port:      u16,
  /// Named database instances, identical in schema, fully isolated in data.
  /// The binary targets one of them via `--instance`.
  pub instances: HashMap<String, InstanceConfig>,
}

/// Connection target of a single instance.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceConfig {
  pub store_path: PathBuf,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: ScoreStore + 'static,
{
  Router::new()
    .route("/health", get(health::handler::<S>))
    .route("/scores", post(scores::submit::<S>))
    .route("/scores/top", get(scores::top::<S>))
    .route("/players/{player_name}/scores", get(scores::by_player::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
  };
  use serde_json::Value;
  use tally_core::store::SchemaInitializer;
  use tally_store_sqlite::SqliteScoreStore;
  use tower::ServiceExt as _;

  async fn app() -> Router<()> {
    let store = SqliteScoreStore::open_in_memory().await.unwrap();
    store.initialize().await.unwrap();
    router(Arc::new(store))
  }

  async fn send(
    app: &Router<()>,
    method: &str,
    uri: &str,
    body: &str,
  ) -> (StatusCode, Value) {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
  }

  // ── Health ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_reports_ok() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
  }

  // ── Submit ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submit_returns_created_record() {
    let app = app().await;

    let (status, body) = send(
      &app,
      "POST",
      "/scores",
      r#"{"player_name":"alice","player_score":10}"#,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["player_name"], "alice");
    assert_eq!(body["player_score"], 10);
    assert!(body["posted_time"].is_string());
  }

  #[tokio::test]
  async fn submit_empty_name_is_bad_request() {
    let app = app().await;

    let (status, body) = send(
      &app,
      "POST",
      "/scores",
      r#"{"player_name":"","player_score":10}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Nothing was persisted.
    let (_, top) = send(&app, "GET", "/scores/top", "").await;
    assert_eq!(top.as_array().unwrap().len(), 0);
  }

  // ── Leaderboard ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn top_orders_by_score_then_insertion() {
    let app = app().await;

    for body in [
      r#"{"player_name":"alice","player_score":10}"#,
      r#"{"player_name":"bob","player_score":20}"#,
      r#"{"player_name":"carol","player_score":10}"#,
    ] {
      let (status, _) = send(&app, "POST", "/scores", body).await;
      assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/scores/top?limit=3", "").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["player_name"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["bob", "alice", "carol"]);
  }

  #[tokio::test]
  async fn top_limit_zero_is_empty() {
    let app = app().await;
    send(&app, "POST", "/scores", r#"{"player_name":"a","player_score":1}"#)
      .await;

    let (status, body) = send(&app, "GET", "/scores/top?limit=0", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn top_rejects_negative_limit() {
    let app = app().await;
    let (status, _) = send(&app, "GET", "/scores/top?limit=-1", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn top_ascending_order_is_supported() {
    let app = app().await;

    for body in [
      r#"{"player_name":"alice","player_score":10}"#,
      r#"{"player_name":"bob","player_score":20}"#,
    ] {
      send(&app, "POST", "/scores", body).await;
    }

    let (_, body) = send(&app, "GET", "/scores/top?order=asc", "").await;
    let scores: Vec<i64> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["player_score"].as_i64().unwrap())
      .collect();
    assert_eq!(scores, [10, 20]);
  }

  // ── Per-player history ──────────────────────────────────────────────────

  #[tokio::test]
  async fn unknown_player_history_is_empty() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/players/nobody/scores", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn player_history_is_oldest_first() {
    let app = app().await;

    for body in [
      r#"{"player_name":"alice","player_score":1,"posted_time":"2024-06-01T00:00:00Z"}"#,
      r#"{"player_name":"alice","player_score":2,"posted_time":"2024-01-01T00:00:00Z"}"#,
      r#"{"player_name":"bob","player_score":3}"#,
    ] {
      let (status, _) = send(&app, "POST", "/scores", body).await;
      assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/players/alice/scores", "").await;
    assert_eq!(status, StatusCode::OK);

    let scores: Vec<i64> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["player_score"].as_i64().unwrap())
      .collect();
    assert_eq!(scores, [2, 1]);
  }
}
