//! JSON REST API for Atlas.
//!
//! Exposes an axum [`Router`] backed by any [`atlas_core::store::CountryStore`]
//! and any pair of remote feeds. Auth, TLS, and transport concerns are the
//! caller's responsibility.

pub mod artifact;
pub mod countries;
pub mod error;
pub mod refresh;
pub mod status;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use atlas_core::store::CountryStore;
use atlas_ingest::client::{CountryFeed, RateFeed};

pub use error::ApiError;

#[cfg(test)]
mod tests;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and/or
/// `ATLAS_*` environment variables. Everything has a workable default.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  #[serde(default = "default_store_path")]
  pub store_path:    PathBuf,
  /// Where the summary PNG is cached; overwritten on every refresh.
  #[serde(default = "default_artifact_path")]
  pub artifact_path: PathBuf,
  #[serde(default = "default_countries_url")]
  pub countries_url: String,
  #[serde(default = "default_rates_url")]
  pub rates_url:     String,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }
fn default_store_path() -> PathBuf { "atlas.db".into() }
fn default_artifact_path() -> PathBuf { "cache/summary.png".into() }
fn default_countries_url() -> String {
  atlas_ingest::client::DEFAULT_COUNTRIES_URL.into()
}
fn default_rates_url() -> String {
  atlas_ingest::client::DEFAULT_RATES_URL.into()
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          default_host(),
      port:          default_port(),
      store_path:    default_store_path(),
      artifact_path: default_artifact_path(),
      countries_url: default_countries_url(),
      rates_url:     default_rates_url(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, C, R> {
  pub store:        Arc<S>,
  pub country_feed: Arc<C>,
  pub rate_feed:    Arc<R>,
  pub config:       Arc<ServerConfig>,
  /// Serialises refresh invocations: overlapping refreshes would race on
  /// create-vs-update decisions against the same base collection.
  pub refresh_gate: Arc<Mutex<()>>,
}

// Manual impl: `derive(Clone)` would demand Clone on the type parameters.
impl<S, C, R> Clone for AppState<S, C, R> {
  fn clone(&self) -> Self {
    Self {
      store:        Arc::clone(&self.store),
      country_feed: Arc::clone(&self.country_feed),
      rate_feed:    Arc::clone(&self.rate_feed),
      config:       Arc::clone(&self.config),
      refresh_gate: Arc::clone(&self.refresh_gate),
    }
  }
}

impl<S, C, R> AppState<S, C, R> {
  pub fn new(store: S, country_feed: C, rate_feed: R, config: ServerConfig) -> Self {
    Self {
      store:        Arc::new(store),
      country_feed: Arc::new(country_feed),
      rate_feed:    Arc::new(rate_feed),
      config:       Arc::new(config),
      refresh_gate: Arc::new(Mutex::new(())),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `state`.
///
/// `/countries/image` and `/countries/refresh` are registered before the
/// `/countries/{name}` capture so those path segments never match as names.
pub fn router<S, C, R>(state: AppState<S, C, R>) -> Router
where
  S: CountryStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: CountryFeed + 'static,
  R: RateFeed + 'static,
{
  Router::new()
    .route("/countries", get(countries::list::<S, C, R>))
    .route("/countries/refresh", post(refresh::handler::<S, C, R>))
    .route("/countries/image", get(artifact::handler::<S, C, R>))
    .route(
      "/countries/{name}",
      get(countries::get_one::<S, C, R>)
        .delete(countries::delete_one::<S, C, R>),
    )
    .route("/status", get(status::handler::<S, C, R>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
