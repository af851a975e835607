//! Handlers for the `/countries` read and delete endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/countries` | `?region=` substring, `?currency=` exact, `?sort=gdp_desc\|...` |
//! | `GET`    | `/countries/{name}` | case-insensitive; 404 if unknown |
//! | `DELETE` | `/countries/{name}` | case-insensitive; 404 if unknown |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use serde::Deserialize;

use atlas_core::{
  country::CountryRecord,
  store::{CountryQuery, CountryStore, SortKey},
};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub region:   Option<String>,
  pub currency: Option<String>,
  pub sort:     Option<SortKey>,
}

/// `GET /countries[?region=...][&currency=...][&sort=...]`
pub async fn list<S, C, R>(
  State(state): State<AppState<S, C, R>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<CountryRecord>>, ApiError>
where
  S: CountryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = CountryQuery {
    region:   params.region,
    currency: params.currency,
    sort:     params.sort,
  };

  let countries = state.store.search(&query).await.map_err(ApiError::store)?;
  Ok(Json(countries))
}

/// `GET /countries/{name}`
pub async fn get_one<S, C, R>(
  State(state): State<AppState<S, C, R>>,
  Path(name): Path<String>,
) -> Result<Json<CountryRecord>, ApiError>
where
  S: CountryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let country = state
    .store
    .find_by_name(&name)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("country '{name}' not found")))?;
  Ok(Json(country))
}

/// `DELETE /countries/{name}`
pub async fn delete_one<S, C, R>(
  State(state): State<AppState<S, C, R>>,
  Path(name): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: CountryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = state
    .store
    .delete_by_name(&name)
    .await
    .map_err(ApiError::store)?;

  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("country '{name}' not found")))
  }
}
