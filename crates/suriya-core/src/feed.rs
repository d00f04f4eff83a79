//! Historical moon phases from outside the formulas.
//!
//! The calendar arithmetic does not need this data; it only corroborates the
//! computed uposathas. Sources implement [`MoonPhaseFeed`] and hand over New
//! and Full Moons only.

use std::{convert::Infallible, fmt};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, uposatha::Phase};

// ─── AstroMoon ───────────────────────────────────────────────────────────────

/// A New or Full Moon taken from a historical data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstroMoon {
  pub date:  NaiveDate,
  pub phase: Phase,
}

impl AstroMoon {
  pub fn summary(&self) -> String { format!("{} Moon", self.phase.title()) }
}

// ─── Feed trait ──────────────────────────────────────────────────────────────

/// A source of historical moon phases.
///
/// Implementations return the New and Full Moons dated within `from..=to`.
/// They need not be complete: a year with no data is simply absent.
pub trait MoonPhaseFeed {
  type Error: std::error::Error + Send + Sync + 'static;

  fn moon_phases(&self, from: NaiveDate, to: NaiveDate)
  -> Result<Vec<AstroMoon>, Self::Error>;
}

/// A feed without data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeed;

impl MoonPhaseFeed for NoFeed {
  type Error = Infallible;

  fn moon_phases(&self, _: NaiveDate, _: NaiveDate) -> Result<Vec<AstroMoon>, Infallible> {
    Ok(Vec::new())
  }
}

/// A feed over moons already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
  pub moons: Vec<AstroMoon>,
}

impl MoonPhaseFeed for MemoryFeed {
  type Error = Infallible;

  fn moon_phases(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<AstroMoon>, Infallible> {
    Ok(
      self
        .moons
        .iter()
        .filter(|m| m.date >= from && m.date <= to)
        .cloned()
        .collect(),
    )
  }
}

// ─── Persisted reference format ──────────────────────────────────────────────

/// Phase codes of the persisted data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseCode {
  New = 0,
  Waxing = 1,
  Full = 2,
  Waning = 3,
}

impl PhaseCode {
  pub fn from_code(code: u8) -> Result<Self> {
    match code {
      0 => Ok(Self::New),
      1 => Ok(Self::Waxing),
      2 => Ok(Self::Full),
      3 => Ok(Self::Waning),
      other => Err(Error::UnknownPhaseCode(other)),
    }
  }

  /// The uposatha phase, for the two codes that have one.
  pub fn uposatha_phase(self) -> Option<Phase> {
    match self {
      Self::New => Some(Phase::New),
      Self::Full => Some(Phase::Full),
      Self::Waxing | Self::Waning => None,
    }
  }
}

impl fmt::Display for PhaseCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::New => "new",
      Self::Waxing => "waxing",
      Self::Full => "full",
      Self::Waning => "waning",
    })
  }
}

/// One moon phase record of a persisted year file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AerisMoon {
  pub timestamp: i64,
  #[serde(rename = "dateTimeISO")]
  pub date_time: DateTime<FixedOffset>,
  pub code:      u8,
  #[serde(default)]
  pub name:      String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AerisError {
  #[serde(default)]
  pub code:        String,
  #[serde(default)]
  pub description: String,
}

/// A persisted year file: `{ success, error, response: [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AerisResponse {
  pub success:  bool,
  #[serde(default)]
  pub error:    Option<AerisError>,
  #[serde(default)]
  pub response: Vec<AerisMoon>,
}

impl AerisResponse {
  /// Whether the file carries usable data.
  pub fn is_usable(&self) -> bool {
    self.success && self.error.as_ref().is_none_or(|e| e.code.is_empty())
  }

  /// New and Full Moons dated within `from..=to` (UTC dates). Records with
  /// unknown phase codes are skipped.
  pub fn moons(&self, from: NaiveDate, to: NaiveDate) -> Vec<AstroMoon> {
    self
      .response
      .iter()
      .filter_map(|m| {
        let date = m.date_time.with_timezone(&Utc).date_naive();
        if date < from || date > to {
          return None;
        }
        let phase = PhaseCode::from_code(m.code).ok()?.uposatha_phase()?;
        Some(AstroMoon { date, phase })
      })
      .collect()
  }
}
