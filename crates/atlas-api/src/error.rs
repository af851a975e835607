//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! The mapping keeps the three failure domains distinguishable from the
//! outside: upstream trouble is a 502, storage and rendering trouble are
//! 500s, and a missing key is a 404.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// The summary artifact has never been rendered.
  #[error("report artifact not found")]
  ArtifactMissing,

  #[error("upstream failure: {0}")]
  Upstream(#[source] atlas_ingest::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("render error: {0}")]
  Render(#[source] atlas_report::Error),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }
}

impl From<atlas_ingest::Error> for ApiError {
  fn from(e: atlas_ingest::Error) -> Self {
    match e {
      atlas_ingest::Error::UpstreamUnavailable { .. } => ApiError::Upstream(e),
      atlas_ingest::Error::Persistence { .. } => ApiError::Store(Box::new(e)),
    }
  }
}

impl From<atlas_report::Error> for ApiError {
  fn from(e: atlas_report::Error) -> Self { ApiError::Render(e) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::ArtifactMissing => (
        StatusCode::NOT_FOUND,
        Json(json!({
          "error": "Image not found",
          "message": "No summary image available. Refresh country data \
                      first by calling POST /countries/refresh",
        })),
      )
        .into_response(),
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Upstream(e) => (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
      ApiError::Render(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}
