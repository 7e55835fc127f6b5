use thiserror::Error;

/// Error type for quire configuration and page templates
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Template error: {0}")]
  Template(String),
}

impl From<tera::Error> for ConfigError {
  fn from(e: tera::Error) -> Self {
    Self::Template(e.to_string())
  }
}
