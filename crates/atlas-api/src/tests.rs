//! Handler-level tests: the refresh pipeline end-to-end against an
//! in-memory store, stub feeds, and a temp-dir artifact path.

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse as _,
};
use tempfile::TempDir;

use atlas_core::country::RateTable;
use atlas_ingest::{
  Result as IngestResult,
  client::{CountryFeed, RateFeed, RawCountry, RawCurrency},
};
use atlas_store_sqlite::SqliteStore;

use crate::{
  AppState, ServerConfig, artifact, countries, countries::ListParams, refresh,
  status,
};

// ─── Stub feeds ──────────────────────────────────────────────────────────────

struct StubCountries(Vec<RawCountry>);

impl CountryFeed for StubCountries {
  async fn fetch_countries(&self) -> IngestResult<Vec<RawCountry>> {
    Ok(self.0.clone())
  }
}

struct StubRates(RateTable);

impl RateFeed for StubRates {
  async fn fetch_rates(&self) -> IngestResult<RateTable> { Ok(self.0.clone()) }
}

fn raw(name: &str, population: u64, code: Option<&str>) -> RawCountry {
  RawCountry {
    name:       name.into(),
    capital:    Some(format!("{name} City")),
    region:     Some("Testlands".into()),
    population,
    flag:       Some(format!("https://flags.example/{name}.svg")),
    currencies: code
      .map(|c| vec![RawCurrency { code: Some(c.into()) }])
      .unwrap_or_default(),
  }
}

type TestState = AppState<SqliteStore, StubCountries, StubRates>;

async fn state_with(
  dir: &TempDir,
  countries: Vec<RawCountry>,
  rates: &[(&str, f64)],
) -> TestState {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let config = ServerConfig {
    artifact_path: dir.path().join("cache").join("summary.png"),
    ..ServerConfig::default()
  };
  let table: RateTable =
    rates.iter().map(|(c, r)| ((*c).to_string(), *r)).collect();
  AppState::new(store, StubCountries(countries), StubRates(table), config)
}

// ─── Artifact fallback ───────────────────────────────────────────────────────

#[tokio::test]
async fn artifact_is_404_before_any_refresh() {
  let dir = TempDir::new().unwrap();
  let state = state_with(&dir, vec![], &[]).await;

  let err = artifact::handler(State(state)).await.map(|_| ()).unwrap_err();
  let response = err.into_response();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ─── Refresh pipeline ────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_populates_store_and_writes_artifact() {
  let dir = TempDir::new().unwrap();
  let state = state_with(
    &dir,
    vec![raw("Japan", 125_000_000, Some("JPY")), raw("Moneyless", 10, None)],
    &[("JPY", 150.0)],
  )
  .await;

  let countries = refresh::handler(State(state.clone())).await.unwrap().0;
  assert_eq!(countries.len(), 2);

  let japan = countries.iter().find(|c| c.name == "Japan").unwrap();
  assert_eq!(japan.currency_code.as_deref(), Some("JPY"));
  assert_eq!(japan.exchange_rate, Some(150.0));
  assert!(japan.estimated_gdp > 0.0);

  let moneyless = countries.iter().find(|c| c.name == "Moneyless").unwrap();
  assert_eq!(moneyless.currency_code, None);
  assert_eq!(moneyless.estimated_gdp, 0.0);

  assert!(state.config.artifact_path.exists());

  let response = artifact::handler(State(state)).await.unwrap().into_response();
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(
    response.headers().get("content-type").unwrap(),
    "image/png"
  );
}

#[tokio::test]
async fn second_refresh_updates_instead_of_duplicating() {
  let dir = TempDir::new().unwrap();
  let state = state_with(
    &dir,
    vec![raw("Japan", 125_000_000, Some("JPY"))],
    &[("JPY", 150.0)],
  )
  .await;

  let first = refresh::handler(State(state.clone())).await.unwrap().0;
  let second = refresh::handler(State(state)).await.unwrap().0;

  assert_eq!(first.len(), 1);
  assert_eq!(second.len(), 1);
  assert_eq!(first[0].id, second[0].id);
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_one_unknown_name_is_404() {
  let dir = TempDir::new().unwrap();
  let state = state_with(&dir, vec![], &[]).await;

  let err = countries::get_one(State(state), Path("Narnia".to_string()))
    .await
    .unwrap_err();
  assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_applies_filters() {
  let dir = TempDir::new().unwrap();
  let state = state_with(
    &dir,
    vec![
      raw("Japan", 125_000_000, Some("JPY")),
      raw("Ecuador", 18_000_000, Some("USD")),
    ],
    &[("JPY", 150.0), ("USD", 1.0)],
  )
  .await;
  refresh::handler(State(state.clone())).await.unwrap();

  let params =
    ListParams { currency: Some("usd".into()), ..Default::default() };
  let hits = countries::list(State(state), Query(params)).await.unwrap().0;
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Ecuador");
}

#[tokio::test]
async fn delete_then_get_is_404() {
  let dir = TempDir::new().unwrap();
  let state = state_with(
    &dir,
    vec![raw("Japan", 125_000_000, Some("JPY"))],
    &[("JPY", 150.0)],
  )
  .await;
  refresh::handler(State(state.clone())).await.unwrap();

  let code = countries::delete_one(State(state.clone()), Path("jApAn".into()))
    .await
    .unwrap();
  assert_eq!(code, StatusCode::NO_CONTENT);

  let err = countries::get_one(State(state), Path("Japan".into()))
    .await
    .unwrap_err();
  assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

// ─── Status ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_reports_count_and_recency() {
  let dir = TempDir::new().unwrap();
  let state = state_with(
    &dir,
    vec![raw("Japan", 125_000_000, Some("JPY"))],
    &[("JPY", 150.0)],
  )
  .await;

  let empty = status::handler(State(state.clone())).await.unwrap().0;
  assert_eq!(empty.total_countries, 0);
  assert!(empty.last_refreshed_at.is_none());

  refresh::handler(State(state.clone())).await.unwrap();

  let after = status::handler(State(state)).await.unwrap().0;
  assert_eq!(after.total_countries, 1);
  assert!(after.last_refreshed_at.unwrap().ends_with('Z'));
}
