//! The `ScoreStore` and `SchemaInitializer` traits and supporting types.
//!
//! The traits are implemented by storage backends (e.g.
//! `tally-store-sqlite`). Higher layers (`tally-server`) depend on these
//! abstractions, not on any concrete backend. One implementation,
//! parameterized by its connection target, serves both the production and
//! the test instance — environment identity is configuration, never code.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{error::StoreError, record::{NewScore, ScoreRecord}};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Sort direction for [`ScoreStore::list_top`]. Descending is the
/// leaderboard default; equal scores always tie-break by ascending `id`, so
/// the earlier submission wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreOrder {
  #[default]
  #[serde(rename = "desc")]
  Descending,
  #[serde(rename = "asc")]
  Ascending,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Access contract over one initialised score-store instance.
///
/// Writes are append-only: there is no update or delete operation, and a
/// `submit` is atomic — a concurrent reader sees the whole record or no
/// record, never a partial one. Reads may run concurrently with any number
/// of other reads and writes and must not block writers.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ScoreStore: Send + Sync {
  type Error: StoreError + Send + Sync + 'static;

  /// Validate and persist one submission, returning the stored record with
  /// its newly assigned, strictly increasing `id`.
  ///
  /// A missing `posted_time` is filled with the insertion instant.
  fn submit(
    &self,
    input: NewScore,
  ) -> impl Future<Output = Result<ScoreRecord, Self::Error>> + Send + '_;

  /// Up to `limit` records ordered by `player_score` (descending by
  /// default), ties broken by ascending `id`. `limit == 0` yields an empty
  /// vec, not an error. Read-only.
  fn list_top(
    &self,
    limit: usize,
    order: ScoreOrder,
  ) -> impl Future<Output = Result<Vec<ScoreRecord>, Self::Error>> + Send + '_;

  /// All records for `player_name` in ascending `posted_time` order, then
  /// ascending `id` for equal timestamps. An unknown player yields an empty
  /// vec, not an error. Re-invoke to restart the sequence.
  fn list_by_player<'a>(
    &'a self,
    player_name: &'a str,
  ) -> impl Future<Output = Result<Vec<ScoreRecord>, Self::Error>> + Send + 'a;

  /// Connectivity probe against the backing instance. Mutates nothing.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

/// Idempotent, destructive bootstrap of one instance's schema.
///
/// Kept separate from [`ScoreStore`] so serving code, which is generic over
/// `ScoreStore` only, has no path to the destructive operation.
pub trait SchemaInitializer: Send + Sync {
  type Error: StoreError + Send + Sync + 'static;

  /// Drop the score table if it exists — including all contained data —
  /// then create it fresh. Any number of sequential calls terminates with
  /// exactly one empty table of the correct shape.
  ///
  /// This is NOT a safe migration: it irreversibly destroys prior contents
  /// of the table. Never invoke it against an instance whose data must be
  /// preserved, and never concurrently with serving traffic on the same
  /// instance. On failure the instance keeps its pre-call state; retry from
  /// the top.
  fn initialize(&self)
  -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
