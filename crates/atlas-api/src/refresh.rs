//! `POST /countries/refresh` — the whole pipeline in one request.
//!
//! Fetch → aggregate → reconcile → render. Serialised by the state's
//! refresh gate so two concurrent refreshes cannot race on create-vs-update
//! decisions. A failure at any stage aborts the request; whatever an earlier
//! refresh committed stays in place.

use axum::{Json, extract::State};
use chrono::Utc;

use atlas_core::{country::CountryRecord, gdp::ThreadRngFactors, store::CountryStore};
use atlas_ingest::{
  aggregate::aggregate,
  client::{CountryFeed, RateFeed},
  reconcile::reconcile,
};
use atlas_report::{Summary, write_summary};

use crate::{AppState, error::ApiError};

pub async fn handler<S, C, R>(
  State(state): State<AppState<S, C, R>>,
) -> Result<Json<Vec<CountryRecord>>, ApiError>
where
  S: CountryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: CountryFeed,
  R: RateFeed,
{
  let _gate = state.refresh_gate.lock().await;

  let mut factors = ThreadRngFactors;
  let candidates =
    aggregate(&*state.country_feed, &*state.rate_feed, &mut factors).await?;

  let now = Utc::now();
  let countries = reconcile(&*state.store, candidates, now).await?;

  let top = state.store.top_by_gdp(5).await.map_err(ApiError::store)?;
  let summary = Summary {
    total_countries: countries.len() as u64,
    top:             top
      .into_iter()
      .map(|c| (c.name, c.estimated_gdp))
      .collect(),
    last_refresh:    Some(now),
  };

  write_summary(&summary, &state.config.artifact_path)?;
  tracing::info!(
    total = countries.len(),
    artifact = %state.config.artifact_path.display(),
    "refresh complete"
  );

  Ok(Json(countries))
}
