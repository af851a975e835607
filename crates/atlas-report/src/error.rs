//! Error type for `atlas-report`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The report artifact could not be encoded or written to the cache path.
  #[error("failed to write report artifact: {cause}")]
  ArtifactWrite {
    #[source]
    cause: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Self {
    Error::ArtifactWrite { cause: Box::new(e) }
  }
}

impl From<image::ImageError> for Error {
  fn from(e: image::ImageError) -> Self {
    Error::ArtifactWrite { cause: Box::new(e) }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
