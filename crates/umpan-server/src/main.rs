//! umpan server binary.
//!
//! Reads `umpan.toml` (or the path given with `--config`), opens the JSON
//! document store in the configured data directory, and serves the API over
//! HTTP.
//!
//! ```
//! cargo run -p umpan-server -- --data-dir ./data
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use umpan_core::Registry;
use umpan_server::{ServerConfig, expand_tilde};
use umpan_store_json::JsonFileStore;

#[derive(Parser)]
#[command(author, version, about = "umpan event feedback server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "umpan.toml")]
  config: PathBuf,

  /// Directory for `events.json` and `feedback.json`; overrides the config.
  #[arg(long, env = "DATA_DIR")]
  data_dir: Option<PathBuf>,
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

  let mut server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(dir) = cli.data_dir {
    server_cfg.data_dir = dir;
  }

  let data_dir = expand_tilde(&server_cfg.data_dir);
  tracing::info!(?data_dir, "using data directory");

  let registry = Arc::new(Registry::new(JsonFileStore::new(data_dir)));
  let app = umpan_server::router(registry);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
