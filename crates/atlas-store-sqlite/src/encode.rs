//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings with a `Z` marker,
//! which makes lexicographic order equal to chronological order (used by
//! `MAX(last_refreshed_at)`). UUIDs are stored as hyphenated lowercase
//! strings.

use atlas_core::country::CountryRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

// Nanosecond precision keeps the round trip lossless; the fixed width is
// what makes MAX() on the text column chronological.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Column order shared by every SELECT over `countries`.
pub const COLUMNS: &str = "id, name, capital, region, population, \
   currency_code, exchange_rate, estimated_gdp, flag_url, last_refreshed_at";

/// The raw text/number form of a `countries` row, before any parsing.
pub struct RawCountryRow {
  pub id:                String,
  pub name:              String,
  pub capital:           Option<String>,
  pub region:            Option<String>,
  pub population:        i64,
  pub currency_code:     Option<String>,
  pub exchange_rate:     Option<f64>,
  pub estimated_gdp:     f64,
  pub flag_url:          Option<String>,
  pub last_refreshed_at: String,
}

impl RawCountryRow {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      name:              row.get(1)?,
      capital:           row.get(2)?,
      region:            row.get(3)?,
      population:        row.get(4)?,
      currency_code:     row.get(5)?,
      exchange_rate:     row.get(6)?,
      estimated_gdp:     row.get(7)?,
      flag_url:          row.get(8)?,
      last_refreshed_at: row.get(9)?,
    })
  }

  pub fn into_record(self) -> Result<CountryRecord> {
    Ok(CountryRecord {
      id:                Uuid::parse_str(&self.id)?,
      name:              self.name,
      capital:           self.capital,
      region:            self.region,
      population:        self.population.max(0) as u64,
      currency_code:     self.currency_code,
      exchange_rate:     self.exchange_rate,
      estimated_gdp:     self.estimated_gdp,
      flag_url:          self.flag_url,
      last_refreshed_at: decode_dt(&self.last_refreshed_at)?,
    })
  }
}
