//! Error type for `suriya-astro`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("malformed moon phase data in {}: {source}", path.display())]
  Json {
    path:   PathBuf,
    source: serde_json::Error,
  },

  #[error("not a directory: {}", .0.display())]
  NotADirectory(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
