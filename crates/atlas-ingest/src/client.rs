//! Remote data clients for the two upstream feeds.
//!
//! The feeds live behind the [`CountryFeed`] and [`RateFeed`] traits so the
//! aggregator can be exercised with counting mocks in tests. The production
//! implementations share one [`reqwest::Client`] and apply independent
//! per-request timeouts: the country list is expected to answer quickly, the
//! rate table is given more slack.

use std::{future::Future, time::Duration};

use atlas_core::country::RateTable;
use serde::Deserialize;

use crate::{Error, Result, Upstream};

/// Default country-list endpoint (REST Countries v2, trimmed field set).
pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";

/// Default exchange-rate endpoint, USD reference.
pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";

const COUNTRIES_TIMEOUT: Duration = Duration::from_secs(5);
const RATES_TIMEOUT: Duration = Duration::from_secs(10);

// ─── Wire shapes ─────────────────────────────────────────────────────────────

/// One entry of a country's `currencies` array. Only `code` is used.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrency {
  #[serde(default)]
  pub code: Option<String>,
}

/// A raw country entry as served by the country feed.
///
/// `name` is required — an entry without one is rejected at deserialisation
/// and fails the whole fetch. Every other field defaults when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
  pub name:       String,
  #[serde(default)]
  pub capital:    Option<String>,
  #[serde(default)]
  pub region:     Option<String>,
  #[serde(default)]
  pub population: u64,
  #[serde(default)]
  pub flag:       Option<String>,
  #[serde(default)]
  pub currencies: Vec<RawCurrency>,
}

/// Envelope of the rate feed; only the `rates` member is consumed.
#[derive(Debug, Deserialize)]
struct RateDocument {
  #[serde(default)]
  rates: RateTable,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Source of the raw country list.
pub trait CountryFeed: Send + Sync {
  fn fetch_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<RawCountry>>> + Send + '_;
}

/// Source of the exchange-rate table (local currency per USD).
pub trait RateFeed: Send + Sync {
  fn fetch_rates(&self) -> impl Future<Output = Result<RateTable>> + Send + '_;
}

// ─── Production clients ──────────────────────────────────────────────────────

/// Country feed backed by the REST Countries API.
#[derive(Clone)]
pub struct RestCountriesClient {
  client: reqwest::Client,
  url:    String,
}

impl RestCountriesClient {
  pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
    Self { client, url: url.into() }
  }
}

impl CountryFeed for RestCountriesClient {
  async fn fetch_countries(&self) -> Result<Vec<RawCountry>> {
    let resp = self
      .client
      .get(&self.url)
      .timeout(COUNTRIES_TIMEOUT)
      .send()
      .await
      .map_err(|e| Error::upstream(Upstream::Countries, e))?;

    if !resp.status().is_success() {
      return Err(Error::upstream(
        Upstream::Countries,
        format!("GET {} → {}", self.url, resp.status()),
      ));
    }

    resp
      .json()
      .await
      .map_err(|e| Error::upstream(Upstream::Countries, e))
  }
}

/// Rate feed backed by the open.er-api.com USD table.
#[derive(Clone)]
pub struct ExchangeRateClient {
  client: reqwest::Client,
  url:    String,
}

impl ExchangeRateClient {
  pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
    Self { client, url: url.into() }
  }
}

impl RateFeed for ExchangeRateClient {
  async fn fetch_rates(&self) -> Result<RateTable> {
    let resp = self
      .client
      .get(&self.url)
      .timeout(RATES_TIMEOUT)
      .send()
      .await
      .map_err(|e| Error::upstream(Upstream::ExchangeRates, e))?;

    if !resp.status().is_success() {
      return Err(Error::upstream(
        Upstream::ExchangeRates,
        format!("GET {} → {}", self.url, resp.status()),
      ));
    }

    let doc: RateDocument = resp
      .json()
      .await
      .map_err(|e| Error::upstream(Upstream::ExchangeRates, e))?;

    Ok(doc.rates)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn raw_country_defaults_missing_fields() {
    let raw: RawCountry = serde_json::from_str(r#"{"name":"Chad"}"#).unwrap();
    assert_eq!(raw.name, "Chad");
    assert_eq!(raw.population, 0);
    assert!(raw.capital.is_none());
    assert!(raw.currencies.is_empty());
  }

  #[test]
  fn raw_country_without_name_is_rejected() {
    let result: std::result::Result<RawCountry, _> =
      serde_json::from_str(r#"{"population": 42}"#);
    assert!(result.is_err());
  }

  #[test]
  fn rate_document_extracts_rates_member() {
    let doc: RateDocument = serde_json::from_str(
      r#"{"result":"success","base_code":"USD","rates":{"EUR":0.9,"JPY":150.0}}"#,
    )
    .unwrap();
    assert_eq!(doc.rates.get("EUR"), Some(&0.9));
    assert_eq!(doc.rates.len(), 2);
  }
}
