//! Errors raised while loading content documents.
//!
//! Rendering itself never fails; these only cover reading and decoding the
//! JSON that content arrives in.
use std::{io, path::PathBuf};

/// Result type for content loading operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Failed to read {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Invalid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Field '{0}' not found in content document")]
  MissingField(String),

  #[error("Expected an array of content nodes at '{0}'")]
  NotASequence(String),
}
