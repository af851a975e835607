//! `GET /countries/image` — serve the cached summary artifact.

use axum::{
  extract::State,
  http::header,
  response::IntoResponse,
};

use crate::{AppState, error::ApiError};

pub async fn handler<S, C, R>(
  State(state): State<AppState<S, C, R>>,
) -> Result<impl IntoResponse, ApiError> {
  let bytes = match tokio::fs::read(&state.config.artifact_path).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      return Err(ApiError::ArtifactMissing);
    }
    Err(e) => return Err(ApiError::Store(Box::new(e))),
  };

  let headers = [
    (header::CONTENT_TYPE, "image/png"),
    (header::CONTENT_DISPOSITION, "inline; filename=summary.png"),
  ];

  Ok((headers, bytes))
}
