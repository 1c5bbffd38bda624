//! tally-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite instance selected with `--instance`, and either (re)creates its
//! schema or serves the JSON API against it.
//!
//! # Bootstrap order
//!
//! `init` drops and recreates the score table. It must be sequenced before
//! any serving traffic on the same instance:
//!
//! ```text
//! tally-server --instance test init
//! tally-server --instance test serve
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tally_core::store::SchemaInitializer;
use tally_server::{ServerConfig, router};
use tally_store_sqlite::SqliteScoreStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "tally score-store server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Named instance to target, e.g. "production" or "test".
  #[arg(short, long, default_value = "production")]
  instance: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Destructively (re)create the score table on the selected instance.
  ///
  /// Drops the table and ALL contained rows, then creates it empty. Safe to
  /// repeat; never run it against an instance whose data must be preserved.
  Init,

  /// Serve the JSON API against the selected instance.
  Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TALLY"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let instance_cfg = server_cfg
    .instances
    .get(&cli.instance)
    .with_context(|| format!("instance {:?} is not configured", cli.instance))?;

  // Open the selected instance.
  let store = SqliteScoreStore::open(&instance_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open instance at {:?}", instance_cfg.store_path)
    })?;

  match cli.command {
    Command::Init => {
      store
        .initialize()
        .await
        .context("schema initialization failed")?;
      tracing::info!(
        instance = %cli.instance,
        "score table (re)created; all prior rows discarded"
      );
    }

    Command::Serve => {
      let app = router(Arc::new(store));
      let address = format!("{}:{}", server_cfg.host, server_cfg.port);

      tracing::info!(
        instance = %cli.instance,
        "listening on http://{address}"
      );
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app).await.context("server error")?;
    }
  }

  Ok(())
}
