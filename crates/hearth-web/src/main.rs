//! hearth server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) layered under
//! `HEARTH_*` environment variables, opens the SQLite store, seeds it from the
//! external profile source if it is empty, and serves the app over HTTP.
//!
//! `HEARTH_SESSION_SECRET` (or `session_secret` in the file) is required.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use hearth_core::seed;
use hearth_store_sqlite::SqliteStore;
use hearth_web::{AppState, ServerConfig, randomuser::RandomUserSource};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Hearth social directory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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
    .add_source(config::Environment::with_prefix("HEARTH").try_parsing(true))
    .build()
    .context("failed to read configuration")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let session_secret = server_cfg.require_session_secret()?.to_owned();

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Seeding must finish before the listener is bound.
  let source = RandomUserSource::new(server_cfg.profile_source_url.clone())
    .context("failed to build HTTP client")?;
  let directory = seed::bootstrap(&store, &source, server_cfg.seed_batch_size)
    .await
    .context("bootstrap seeding failed")?;
  tracing::info!(profiles = directory.len().await, "directory loaded");

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let state = AppState::new(store, directory, session_secret, server_cfg);
  let app = hearth_web::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
