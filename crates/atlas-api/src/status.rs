//! `GET /status` — dataset size and recency at a glance.

use axum::{Json, extract::State};
use chrono::SecondsFormat;
use serde::Serialize;

use atlas_core::store::CountryStore;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
  pub total_countries:   u64,
  /// RFC 3339 UTC with `Z` marker; `null` until the first refresh.
  pub last_refreshed_at: Option<String>,
}

pub async fn handler<S, C, R>(
  State(state): State<AppState<S, C, R>>,
) -> Result<Json<StatusResponse>, ApiError>
where
  S: CountryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let total_countries = state.store.count().await.map_err(ApiError::store)?;
  let last_refreshed_at = state
    .store
    .last_refreshed()
    .await
    .map_err(ApiError::store)?
    .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Micros, true));

  Ok(Json(StatusResponse { total_countries, last_refreshed_at }))
}
