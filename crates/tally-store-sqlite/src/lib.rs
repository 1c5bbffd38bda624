//! SQLite backend for the tally score store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. One [`SqliteScoreStore`] per
//! instance; the production and test instances are opened at distinct
//! endpoints and never share state.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteScoreStore;
