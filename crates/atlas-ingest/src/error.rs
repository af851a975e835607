//! Error types for `atlas-ingest`.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which remote source failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
  Countries,
  ExchangeRates,
}

impl std::fmt::Display for Upstream {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Upstream::Countries => write!(f, "country list"),
      Upstream::ExchangeRates => write!(f, "exchange rate table"),
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  /// A remote fetch failed — non-success status and transport errors are
  /// collapsed into this one kind, with the original cause attached.
  #[error("upstream {upstream} unavailable: {cause}")]
  UpstreamUnavailable {
    upstream: Upstream,
    #[source]
    cause:    BoxError,
  },

  /// A store read or write failed during reconciliation.
  #[error("persistence failure during {operation}: {cause}")]
  Persistence {
    operation: &'static str,
    #[source]
    cause:     BoxError,
  },
}

impl Error {
  pub fn upstream(upstream: Upstream, cause: impl Into<BoxError>) -> Self {
    Error::UpstreamUnavailable { upstream, cause: cause.into() }
  }

  pub fn persistence(
    operation: &'static str,
    cause: impl Into<BoxError>,
  ) -> Self {
    Error::Persistence { operation, cause: cause.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
