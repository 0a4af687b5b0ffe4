//! Vigil server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, spawns the weather reconciler when a feed
//! credential is configured, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use vigil_core::{
  locality::{MonitoredLocality, default_localities},
  scan::RandomRisk,
};
use vigil_store_sqlite::SqliteStore;
use vigil_weather::{OneCallClient, Reconciler};

#[derive(Parser)]
#[command(author, version, about = "Vigil alert aggregation server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `VIGIL_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:                String,
  #[serde(default = "default_port")]
  port:                u16,
  #[serde(default = "default_store_path")]
  store_path:          PathBuf,
  /// Absent credential disables weather reconciliation; startup still
  /// succeeds.
  openweather_api_key: Option<String>,
  #[serde(default = "default_poll_secs")]
  weather_poll_secs:   u64,
  #[serde(default = "default_localities")]
  localities:          Vec<MonitoredLocality>,
}

fn default_host() -> String { "0.0.0.0".to_owned() }
fn default_port() -> u16 { 5000 }
fn default_store_path() -> PathBuf { PathBuf::from("vigil.db") }
fn default_poll_secs() -> u64 { 5 * 60 }

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
    .add_source(config::Environment::with_prefix("VIGIL"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open SQLite store.
  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;
  let store = Arc::new(store);

  // Weather reconciliation runs only with a configured credential.
  match &server_cfg.openweather_api_key {
    Some(key) => {
      let feed = OneCallClient::new(key.clone())
        .context("failed to build weather feed client")?;
      let reconciler =
        Reconciler::new(store.clone(), feed, server_cfg.localities.clone())
          .with_poll_interval(Duration::from_secs(
            server_cfg.weather_poll_secs,
          ));
      tokio::spawn(reconciler.run());
    }
    None => tracing::warn!(
      "openweather_api_key not configured; weather reconciliation disabled"
    ),
  }

  let app = vigil_api::api_router(store, Arc::new(RandomRisk))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
