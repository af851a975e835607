//! [`SqliteStore`] — the SQLite implementation of [`CountryStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use atlas_core::{
  country::CountryRecord,
  store::{CountryQuery, CountryStore, SortKey},
};

use crate::{
  Error, Result,
  encode::{COLUMNS, RawCountryRow, decode_dt, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Atlas country store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a prepared SELECT over `countries` and decode every row.
  async fn select_rows(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<CountryRecord>> {
    let raws: Vec<RawCountryRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(params.iter()),
            RawCountryRow::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCountryRow::into_record).collect()
  }
}

/// ORDER BY fragment for a sort key. Store-native (rowid) order otherwise.
fn order_clause(sort: Option<SortKey>) -> &'static str {
  match sort {
    Some(SortKey::GdpAsc) => " ORDER BY estimated_gdp ASC",
    Some(SortKey::GdpDesc) => " ORDER BY estimated_gdp DESC",
    Some(SortKey::PopulationAsc) => " ORDER BY population ASC",
    Some(SortKey::PopulationDesc) => " ORDER BY population DESC",
    Some(SortKey::NameAsc) => " ORDER BY name ASC",
    Some(SortKey::NameDesc) => " ORDER BY name DESC",
    None => "",
  }
}

// ─── CountryStore impl ───────────────────────────────────────────────────────

impl CountryStore for SqliteStore {
  type Error = Error;

  async fn list_all(&self) -> Result<Vec<CountryRecord>> {
    self
      .select_rows(format!("SELECT {COLUMNS} FROM countries"), vec![])
      .await
  }

  async fn search(&self, query: &CountryQuery) -> Result<Vec<CountryRecord>> {
    // Build the WHERE clause dynamically; filters AND together and an
    // absent filter contributes nothing.
    let mut conds: Vec<String> = vec![];
    let mut params: Vec<String> = vec![];

    if let Some(region) = query.region.as_deref() {
      params.push(format!("%{}%", region.to_lowercase()));
      conds.push(format!("lower(region) LIKE ?{}", params.len()));
    }
    if let Some(currency) = query.currency.as_deref() {
      params.push(currency.to_uppercase());
      conds.push(format!("upper(currency_code) = ?{}", params.len()));
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!(" WHERE {}", conds.join(" AND "))
    };

    let sql = format!(
      "SELECT {COLUMNS} FROM countries{where_clause}{}",
      order_clause(query.sort)
    );

    self.select_rows(sql, params).await
  }

  async fn find_by_name(&self, name: &str) -> Result<Option<CountryRecord>> {
    let name = name.to_owned();

    let raw: Option<RawCountryRow> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {COLUMNS} FROM countries WHERE lower(name) = lower(?1)"
              ),
              rusqlite::params![name],
              RawCountryRow::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountryRow::into_record).transpose()
  }

  async fn upsert_many(&self, records: Vec<CountryRecord>) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO countries (
               id, name, capital, region, population,
               currency_code, exchange_rate, estimated_gdp, flag_url,
               last_refreshed_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
               name              = excluded.name,
               capital           = excluded.capital,
               region            = excluded.region,
               population        = excluded.population,
               currency_code     = excluded.currency_code,
               exchange_rate     = excluded.exchange_rate,
               estimated_gdp     = excluded.estimated_gdp,
               flag_url          = excluded.flag_url,
               last_refreshed_at = excluded.last_refreshed_at",
          )?;

          for record in &records {
            stmt.execute(rusqlite::params![
              encode_uuid(record.id),
              record.name,
              record.capital,
              record.region,
              record.population as i64,
              record.currency_code,
              record.exchange_rate,
              record.estimated_gdp,
              record.flag_url,
              encode_dt(record.last_refreshed_at),
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_by_name(&self, name: &str) -> Result<bool> {
    let name = name.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM countries WHERE lower(name) = lower(?1)",
          rusqlite::params![name],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM countries", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n.max(0) as u64)
  }

  async fn top_by_gdp(&self, n: u32) -> Result<Vec<CountryRecord>> {
    self
      .select_rows(
        format!(
          "SELECT {COLUMNS} FROM countries \
           ORDER BY estimated_gdp DESC LIMIT {n}"
        ),
        vec![],
      )
      .await
  }

  async fn last_refreshed(&self) -> Result<Option<DateTime<Utc>>> {
    // Fixed-width RFC 3339 means MAX on text is chronological.
    let latest: Option<String> = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT MAX(last_refreshed_at) FROM countries",
          [],
          |r| r.get(0),
        )?)
      })
      .await?;

    latest.as_deref().map(decode_dt).transpose()
  }
}
