//! SQL for the tally SQLite store.
//!
//! The score table is (re)created only through
//! [`SchemaInitializer::initialize`](tally_core::store::SchemaInitializer),
//! never as a side effect of opening a connection.

/// Applied to every new connection. WAL keeps readers from blocking the
/// single writer.
pub const CONNECTION_PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA synchronous  = NORMAL;
";

/// Destructive drop-then-create DDL for the reserved `score` table.
///
/// Run inside one transaction so a mid-sequence failure leaves the instance
/// in its pre-call state. AUTOINCREMENT pins ids to a strictly increasing,
/// never-reused sequence starting at 1.
pub const RECREATE_SCORE_TABLE: &str = "
DROP TABLE IF EXISTS score;

CREATE TABLE score (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    player_name  TEXT    NOT NULL,
    player_score INTEGER NOT NULL,
    posted_time  TEXT    NOT NULL
                 DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX score_player_idx ON score(player_name, posted_time, id);
CREATE INDEX score_rank_idx   ON score(player_score DESC, id ASC);
";
