//! Dataset Aggregator — composes the two feeds and the GDP estimator into
//! one in-memory candidate set.
//!
//! Aggregation is all-or-nothing: a failure from either feed aborts the run
//! and no partial dataset ever reaches reconciliation.

use atlas_core::{
  country::{CandidateRecord, RateTable},
  gdp::{FactorSource, estimate_gdp},
};

use crate::{
  Result,
  client::{CountryFeed, RateFeed, RawCountry},
};

/// Fetch both feeds and derive one [`CandidateRecord`] per raw country,
/// source order preserved.
///
/// The rate table is only fetched when at least one raw country declares a
/// currency; a run of currency-less countries never touches the rate feed.
pub async fn aggregate(
  countries: &impl CountryFeed,
  rates: &impl RateFeed,
  factors: &mut impl FactorSource,
) -> Result<Vec<CandidateRecord>> {
  let raw = countries.fetch_countries().await?;

  let needs_rates = raw.iter().any(|c| !c.currencies.is_empty());
  let table = if needs_rates {
    Some(rates.fetch_rates().await?)
  } else {
    None
  };

  tracing::debug!(
    countries = raw.len(),
    rates_fetched = needs_rates,
    "aggregated remote dataset"
  );

  Ok(
    raw
      .into_iter()
      .map(|country| derive(country, table.as_ref(), factors))
      .collect(),
  )
}

/// Derive one candidate: first declared currency code, its rate if known,
/// and the estimated GDP.
fn derive(
  country: RawCountry,
  table: Option<&RateTable>,
  factors: &mut impl FactorSource,
) -> CandidateRecord {
  let code = country
    .currencies
    .first()
    .and_then(|currency| currency.code.clone());

  let rate = code
    .as_deref()
    .and_then(|c| table.and_then(|t| t.get(c)))
    .copied();

  let estimated_gdp = estimate_gdp(country.population, rate, factors);

  CandidateRecord {
    name: country.name,
    capital: country.capital,
    region: country.region,
    population: country.population,
    currency_code: code,
    exchange_rate: rate,
    estimated_gdp,
    flag_url: country.flag,
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use atlas_core::gdp::FixedFactors;

  use super::*;
  use crate::{Error, Upstream, client::RawCurrency};

  struct StubCountries(Vec<RawCountry>);

  impl CountryFeed for StubCountries {
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>> {
      Ok(self.0.clone())
    }
  }

  /// Rate feed that counts how many times it was called.
  struct CountingRates {
    table: RateTable,
    calls: AtomicUsize,
  }

  impl CountingRates {
    fn new(table: RateTable) -> Self {
      Self { table, calls: AtomicUsize::new(0) }
    }
  }

  impl RateFeed for CountingRates {
    async fn fetch_rates(&self) -> Result<RateTable> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      Ok(self.table.clone())
    }
  }

  struct FailingRates;

  impl RateFeed for FailingRates {
    async fn fetch_rates(&self) -> Result<RateTable> {
      Err(Error::upstream(Upstream::ExchangeRates, "boom"))
    }
  }

  fn raw(name: &str, population: u64, codes: &[&str]) -> RawCountry {
    RawCountry {
      name:       name.into(),
      capital:    Some(format!("{name} City")),
      region:     Some("Testlands".into()),
      population,
      flag:       None,
      currencies: codes
        .iter()
        .map(|c| RawCurrency { code: Some((*c).into()) })
        .collect(),
    }
  }

  fn rates(entries: &[(&str, f64)]) -> RateTable {
    entries.iter().map(|(c, r)| ((*c).to_string(), *r)).collect()
  }

  #[tokio::test]
  async fn derives_gdp_from_first_currency() {
    let countries = StubCountries(vec![raw("Japan", 1_000, &["JPY", "USD"])]);
    let feed = CountingRates::new(rates(&[("JPY", 150.0), ("USD", 1.0)]));
    let mut factors = FixedFactors(1500.0);

    let candidates =
      aggregate(&countries, &feed, &mut factors).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].currency_code.as_deref(), Some("JPY"));
    assert_eq!(candidates[0].exchange_rate, Some(150.0));
    assert_eq!(candidates[0].estimated_gdp, 1_000.0 * 1500.0 / 150.0);
  }

  #[tokio::test]
  async fn no_currency_yields_zero_gdp_and_absent_fields() {
    let countries = StubCountries(vec![
      raw("Moneyless", 5_000, &[]),
      raw("Japan", 1_000, &["JPY"]),
    ]);
    let feed = CountingRates::new(rates(&[("JPY", 150.0)]));
    let mut factors = FixedFactors(1500.0);

    let candidates =
      aggregate(&countries, &feed, &mut factors).await.unwrap();
    let moneyless = &candidates[0];
    assert_eq!(moneyless.currency_code, None);
    assert_eq!(moneyless.exchange_rate, None);
    assert_eq!(moneyless.estimated_gdp, 0.0);
  }

  #[tokio::test]
  async fn unknown_code_yields_zero_gdp_but_keeps_code() {
    let countries = StubCountries(vec![raw("Atlantis", 9_000, &["ATL"])]);
    let feed = CountingRates::new(rates(&[("JPY", 150.0)]));
    let mut factors = FixedFactors(1500.0);

    let candidates =
      aggregate(&countries, &feed, &mut factors).await.unwrap();
    assert_eq!(candidates[0].currency_code.as_deref(), Some("ATL"));
    assert_eq!(candidates[0].exchange_rate, None);
    assert_eq!(candidates[0].estimated_gdp, 0.0);
  }

  #[tokio::test]
  async fn rate_fetch_skipped_when_no_country_declares_a_currency() {
    let countries = StubCountries(vec![
      raw("Moneyless", 5_000, &[]),
      raw("Barterland", 2_000, &[]),
    ]);
    let feed = CountingRates::new(rates(&[("JPY", 150.0)]));
    let mut factors = FixedFactors(1500.0);

    aggregate(&countries, &feed, &mut factors).await.unwrap();
    assert_eq!(feed.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn rate_fetch_happens_once_when_needed() {
    let countries = StubCountries(vec![
      raw("Moneyless", 5_000, &[]),
      raw("Japan", 1_000, &["JPY"]),
    ]);
    let feed = CountingRates::new(rates(&[("JPY", 150.0)]));
    let mut factors = FixedFactors(1500.0);

    aggregate(&countries, &feed, &mut factors).await.unwrap();
    assert_eq!(feed.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn source_order_is_preserved() {
    let countries = StubCountries(vec![
      raw("Zimbabwe", 1, &[]),
      raw("Albania", 2, &[]),
      raw("Mali", 3, &[]),
    ]);
    let feed = CountingRates::new(RateTable::new());
    let mut factors = FixedFactors(1500.0);

    let candidates =
      aggregate(&countries, &feed, &mut factors).await.unwrap();
    let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Zimbabwe", "Albania", "Mali"]);
  }

  #[tokio::test]
  async fn rate_feed_failure_aborts_the_run() {
    let countries = StubCountries(vec![raw("Japan", 1_000, &["JPY"])]);
    let mut factors = FixedFactors(1500.0);

    let err = aggregate(&countries, &FailingRates, &mut factors)
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      Error::UpstreamUnavailable { upstream: Upstream::ExchangeRates, .. }
    ));
  }
}
