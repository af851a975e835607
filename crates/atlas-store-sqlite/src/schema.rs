//! SQL schema for the Atlas SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per country; the case-insensitive name is the natural key.
-- The unique index is a backstop: reconciliation is responsible for
-- collapsing duplicate names before anything reaches this table.
CREATE TABLE IF NOT EXISTS countries (
    id                TEXT PRIMARY KEY,
    name              TEXT NOT NULL,
    capital           TEXT,
    region            TEXT,
    population        INTEGER NOT NULL DEFAULT 0,
    currency_code     TEXT,
    exchange_rate     REAL,
    estimated_gdp     REAL NOT NULL DEFAULT 0,
    flag_url          TEXT,
    last_refreshed_at TEXT NOT NULL    -- RFC 3339 UTC, fixed-width
);

CREATE UNIQUE INDEX IF NOT EXISTS countries_name_idx ON countries(lower(name));
CREATE INDEX IF NOT EXISTS countries_gdp_idx  ON countries(estimated_gdp);

PRAGMA user_version = 1;
";
