//! [`SqliteScoreStore`] — the SQLite implementation of [`ScoreStore`] and
//! [`SchemaInitializer`].

use std::path::Path;

use chrono::Utc;
use tally_core::{
  record::{NewScore, ScoreRecord},
  store::{SchemaInitializer, ScoreOrder, ScoreStore},
};

use crate::{
  encode::{RawScoreRecord, encode_dt, truncate_dt},
  schema::{CONNECTION_PRAGMAS, RECREATE_SCORE_TABLE},
  Error, Result,
};

const SELECT_COLUMNS: &str = "id, player_name, player_score, posted_time";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A score store backed by a single SQLite instance.
///
/// Cloning is cheap — the inner connection is reference-counted. Opening a
/// store connects and sets pragmas only; the schema is touched exclusively
/// by [`SchemaInitializer::initialize`], which the deployment layer runs
/// before any serving traffic starts.
#[derive(Clone)]
pub struct SqliteScoreStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteScoreStore {
  /// Open the instance at `path`.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(Error::Unavailable)?;
    let store = Self { conn };
    store.apply_pragmas().await?;
    Ok(store)
  }

  /// Open an in-memory instance — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::Unavailable)?;
    let store = Self { conn };
    store.apply_pragmas().await?;
    Ok(store)
  }

  async fn apply_pragmas(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(())
      })
      .await
      .map_err(Error::Unavailable)
  }
}

// ─── SchemaInitializer impl ──────────────────────────────────────────────────

impl SchemaInitializer for SqliteScoreStore {
  type Error = Error;

  async fn initialize(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        // One transaction: either the old table is gone and the new empty
        // one exists, or the instance keeps its pre-call state.
        let tx = conn.transaction()?;
        tx.execute_batch(RECREATE_SCORE_TABLE)?;
        tx.commit()?;
        Ok(())
      })
      .await
      .map_err(Error::Schema)
  }
}

// ─── ScoreStore impl ─────────────────────────────────────────────────────────

impl ScoreStore for SqliteScoreStore {
  type Error = Error;

  async fn submit(&self, input: NewScore) -> Result<ScoreRecord> {
    input.validate()?;

    let posted_time = truncate_dt(input.posted_time.unwrap_or_else(Utc::now));
    let player_name = input.player_name;
    let player_score = input.player_score;

    let name_param = player_name.clone();
    let at_str = encode_dt(posted_time);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO score (player_name, player_score, posted_time)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![name_param, player_score, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::Unavailable)?;

    Ok(ScoreRecord { id, player_name, player_score, posted_time })
  }

  async fn list_top(
    &self,
    limit: usize,
    order: ScoreOrder,
  ) -> Result<Vec<ScoreRecord>> {
    // Ties always break by ascending id: the earlier submission wins.
    let sql = match order {
      ScoreOrder::Descending => format!(
        "SELECT {SELECT_COLUMNS} FROM score
         ORDER BY player_score DESC, id ASC LIMIT ?1"
      ),
      ScoreOrder::Ascending => format!(
        "SELECT {SELECT_COLUMNS} FROM score
         ORDER BY player_score ASC, id ASC LIMIT ?1"
      ),
    };
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawScoreRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![limit], |row| {
            Ok(RawScoreRecord {
              id:           row.get(0)?,
              player_name:  row.get(1)?,
              player_score: row.get(2)?,
              posted_time:  row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Unavailable)?;

    raws.into_iter().map(RawScoreRecord::into_record).collect()
  }

  async fn list_by_player(&self, player_name: &str) -> Result<Vec<ScoreRecord>> {
    let name = player_name.to_owned();

    let raws: Vec<RawScoreRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SELECT_COLUMNS} FROM score
           WHERE player_name = ?1
           ORDER BY posted_time ASC, id ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![name], |row| {
            Ok(RawScoreRecord {
              id:           row.get(0)?,
              player_name:  row.get(1)?,
              player_score: row.get(2)?,
              posted_time:  row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Unavailable)?;

    raws.into_iter().map(RawScoreRecord::into_record).collect()
  }

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await
      .map_err(Error::Unavailable)
  }
}
