//! Country records — the central entity of the Atlas dataset.
//!
//! A [`CountryRecord`] is what the store persists; a [`CandidateRecord`] is
//! the typed intermediate derived from the remote feeds before it has been
//! reconciled against storage. The country *name* is the natural
//! reconciliation key, compared case-insensitively.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Currency code → units of local currency per US dollar.
///
/// Valid only for the lifetime of a single refresh; never persisted.
pub type RateTable = HashMap<String, f64>;

// ─── Stored record ───────────────────────────────────────────────────────────

/// A country as persisted by the store.
///
/// `id` is assigned once at creation and never changes; every other field is
/// overwritten wholesale on each refresh that matches the record by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRecord {
  pub id:                Uuid,
  pub name:              String,
  pub capital:           Option<String>,
  pub region:            Option<String>,
  pub population:        u64,
  pub currency_code:     Option<String>,
  pub exchange_rate:     Option<f64>,
  pub estimated_gdp:     f64,
  pub flag_url:          Option<String>,
  #[serde(with = "utc_z")]
  pub last_refreshed_at: DateTime<Utc>,
}

impl CountryRecord {
  /// Build a brand-new record from a candidate, assigning a fresh id.
  pub fn from_candidate(candidate: CandidateRecord, now: DateTime<Utc>) -> Self {
    Self {
      id:                Uuid::new_v4(),
      name:              candidate.name,
      capital:           candidate.capital,
      region:            candidate.region,
      population:        candidate.population,
      currency_code:     candidate.currency_code,
      exchange_rate:     candidate.exchange_rate,
      estimated_gdp:     candidate.estimated_gdp,
      flag_url:          candidate.flag_url,
      last_refreshed_at: now,
    }
  }

  /// Overwrite every descriptive field from a candidate, keeping `id`.
  pub fn absorb(&mut self, candidate: CandidateRecord, now: DateTime<Utc>) {
    self.name = candidate.name;
    self.capital = candidate.capital;
    self.region = candidate.region;
    self.population = candidate.population;
    self.currency_code = candidate.currency_code;
    self.exchange_rate = candidate.exchange_rate;
    self.estimated_gdp = candidate.estimated_gdp;
    self.flag_url = candidate.flag_url;
    self.last_refreshed_at = now;
  }
}

// ─── Candidate ───────────────────────────────────────────────────────────────

/// A country entry freshly derived from the remote sources, not yet
/// reconciled with storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
  pub name:          String,
  pub capital:       Option<String>,
  pub region:        Option<String>,
  pub population:    u64,
  pub currency_code: Option<String>,
  pub exchange_rate: Option<f64>,
  pub estimated_gdp: f64,
  pub flag_url:      Option<String>,
}

// ─── Timestamp serde ─────────────────────────────────────────────────────────

/// Serialise `DateTime<Utc>` as RFC 3339 with a literal `Z` marker
/// (`2024-01-02T03:04:05.123456Z`), matching the wire format consumers of
/// the JSON API already expect.
pub mod utc_z {
  use chrono::{DateTime, SecondsFormat, Utc};
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(
    dt: &DateTime<Utc>,
    ser: S,
  ) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Micros, true))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    de: D,
  ) -> Result<DateTime<Utc>, D::Error> {
    let s = String::deserialize(de)?;
    DateTime::parse_from_rfc3339(&s)
      .map(|dt| dt.with_timezone(&Utc))
      .map_err(serde::de::Error::custom)
  }
}
