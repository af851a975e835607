//! atlas-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite country store, and serves the JSON API over HTTP. Every setting
//! can also come from `ATLAS_*` environment variables.

use std::path::PathBuf;

use anyhow::Context as _;
use atlas_api::{AppState, ServerConfig};
use atlas_ingest::client::{ExchangeRateClient, RestCountriesClient};
use atlas_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Atlas country dataset server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ATLAS"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;

  let http = reqwest::Client::builder()
    .build()
    .context("failed to build HTTP client")?;
  let country_feed =
    RestCountriesClient::new(http.clone(), server_cfg.countries_url.as_str());
  let rate_feed = ExchangeRateClient::new(http, server_cfg.rates_url.as_str());

  let state = AppState::new(store, country_feed, rate_feed, server_cfg.clone());
  let app = atlas_api::router(state);

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
