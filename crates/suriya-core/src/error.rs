//! Error types for `suriya-core`.
//!
//! The arithmetic itself is total; these errors only arise when parsing
//! names and codes that arrive from outside the crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown moon phase code: {0}")]
  UnknownPhaseCode(u8),

  #[error("unknown moon phase: {0:?}")]
  UnknownPhase(String),

  #[error("unknown lunar month: {0:?}")]
  UnknownMonth(String),

  #[error("unknown calendar: {0:?}")]
  UnknownCalendar(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
