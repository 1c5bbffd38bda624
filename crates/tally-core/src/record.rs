//! ScoreRecord — one persisted score submission.
//!
//! The store is a flat append-mostly log of these rows. All meaningful
//! ordering (leaderboards, per-player history) is computed on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A persisted score submission.
///
/// `id` is assigned by the store on insert, strictly increasing in insertion
/// order within one instance, and never reused. Production and test
/// instances each run their own independent sequence; ids carry no
/// cross-instance meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
  pub id:           i64,
  pub player_name:  String,
  pub player_score: i64,
  pub posted_time:  DateTime<Utc>,
}

/// Caller-facing input for one submission. The `id` is never supplied; a
/// missing `posted_time` is filled with the insertion instant by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScore {
  pub player_name:  String,
  /// Sign and range are deliberately unconstrained.
  pub player_score: i64,
  #[serde(default)]
  pub posted_time:  Option<DateTime<Utc>>,
}

impl NewScore {
  pub fn new(player_name: impl Into<String>, player_score: i64) -> Self {
    Self {
      player_name: player_name.into(),
      player_score,
      posted_time: None,
    }
  }

  /// Check this submission against the data model. Run by every store
  /// before anything is written.
  pub fn validate(&self) -> Result<()> {
    if self.player_name.is_empty() {
      return Err(Error::EmptyPlayerName);
    }
    Ok(())
  }
}
