//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings
//! (`2024-01-02T03:04:05.000006Z`), so lexicographic order of the TEXT
//! column equals chronological order and `posted_time` can be used as a raw
//! SQL sort key.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use tally_core::record::ScoreRecord;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Drop sub-microsecond precision, the column resolution, so a record
/// returned by `submit` compares equal to its later reads.
pub fn truncate_dt(dt: DateTime<Utc>) -> DateTime<Utc> {
  Utc
    .timestamp_micros(dt.timestamp_micros())
    .single()
    .unwrap_or(dt)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `score` row.
pub struct RawScoreRecord {
  pub id:           i64,
  pub player_name:  String,
  pub player_score: i64,
  pub posted_time:  String,
}

impl RawScoreRecord {
  pub fn into_record(self) -> Result<ScoreRecord> {
    Ok(ScoreRecord {
      id:           self.id,
      player_name:  self.player_name,
      player_score: self.player_score,
      posted_time:  decode_dt(&self.posted_time)?,
    })
  }
}
