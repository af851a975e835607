//! The `CountryStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `atlas-store-sqlite`).
//! Higher layers (`atlas-ingest`, `atlas-api`) depend on this abstraction,
//! not on any concrete backend. The store owns record identity; uniqueness
//! of the case-insensitive name key is the Reconciler's job, not the
//! store's.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::country::CountryRecord;

// ─── Query types ─────────────────────────────────────────────────────────────

/// Sort order for [`CountryStore::search`]. Wire names match the `?sort=`
/// query parameter (`gdp_desc`, `population_asc`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
  GdpAsc,
  GdpDesc,
  PopulationAsc,
  PopulationDesc,
  NameAsc,
  NameDesc,
}

/// Parameters for [`CountryStore::search`].
///
/// Filters compose with logical AND; an absent filter excludes nothing.
#[derive(Debug, Clone, Default)]
pub struct CountryQuery {
  /// Case-insensitive substring match against `region`.
  pub region:   Option<String>,
  /// Case-insensitive exact match against `currency_code` (both sides
  /// normalised to uppercase).
  pub currency: Option<String>,
  /// Absent sort leaves store-native ordering.
  pub sort:     Option<SortKey>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an Atlas country store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CountryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the whole collection in store-native order.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<CountryRecord>, Self::Error>> + Send + '_;

  /// Return the records matching `query` (see [`CountryQuery`]).
  fn search<'a>(
    &'a self,
    query: &'a CountryQuery,
  ) -> impl Future<Output = Result<Vec<CountryRecord>, Self::Error>> + Send + 'a;

  /// Look one record up by case-insensitive name. `None` if absent.
  fn find_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<CountryRecord>, Self::Error>> + Send + 'a;

  /// Persist a batch of creates/updates as one logical unit.
  ///
  /// Records whose `id` already exists are overwritten in place; everything
  /// else is inserted. Either the whole batch commits or none of it does.
  fn upsert_many(
    &self,
    records: Vec<CountryRecord>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete one record by case-insensitive name.
  ///
  /// Returns `true` if a record was removed, `false` if none matched.
  fn delete_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Number of stored records.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// The `n` records with the highest `estimated_gdp`, descending.
  /// Ties are broken by store-native order.
  fn top_by_gdp(
    &self,
    n: u32,
  ) -> impl Future<Output = Result<Vec<CountryRecord>, Self::Error>> + Send + '_;

  /// The most recent `last_refreshed_at` across all records, or `None` when
  /// the store is empty.
  fn last_refreshed(
    &self,
  ) -> impl Future<Output = Result<Option<DateTime<Utc>>, Self::Error>> + Send + '_;
}
