//! Intercalation rules: the extra month (adhikamāsa) and the extra day
//! (adhikavāra).
//!
//! Every rule is a pure function of [`YearState`] values, but some look one
//! year back or ahead. [`Almanac`] memoizes the year states so those lookups
//! stay cheap when a generator walks many consecutive years.

use std::{cell::RefCell, collections::HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::year::YearState;

/// Years where the official calendar departed from the adhikavāra formula.
///
/// 1994 should have carried the extra day but the calendar omitted it; 1997
/// added it back.
pub const ADHIKAVARA_EXCEPTIONS: &[(i32, bool)] = &[(1994, false), (1997, true)];

/// Six alternating 29 and 30 day months.
pub const COMMON_YEAR_DAYS: i64 = 6 * (29 + 30);

const ADHIKAMASA_LOOKBACK: i32 = 7;
const ADHIKAVARA_LOOKBACK: i32 = 13;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Knobs for the rule resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeapConfig {
  /// Apply [`ADHIKAVARA_EXCEPTIONS`] to match the official past calendars.
  /// Turning this off yields the "pure" formula calendar.
  #[serde(default = "default_use_exceptions")]
  pub use_exceptions: bool,
}

fn default_use_exceptions() -> bool { true }

impl Default for LeapConfig {
  fn default() -> Self {
    Self {
      use_exceptions: default_use_exceptions(),
    }
  }
}

// ─── Year-level predicates ───────────────────────────────────────────────────

/// The kind of intercalation a lunar year carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearKind {
  Common,
  /// Extra 30 day month (2nd Āsāḷha).
  Adhikamasa,
  /// Extra day added to the 8th month.
  Adhikavara,
}

impl YearKind {
  /// One-letter mark used in year tables.
  pub fn mark(self) -> &'static str {
    match self {
      Self::Common => "",
      Self::Adhikamasa => "m",
      Self::Adhikavara => "d",
    }
  }
}

/// Whether the tithi alone would ask for an extra month.
///
/// Eade gives `t >= 25`, but then 2012 (t = 24) would not be an adhikamāsa
/// year.
pub fn would_be_adhikamasa(su: &YearState) -> bool {
  matches!(su.tithi, 24..=29 | 0..=5)
}

pub fn is_suriya_leap(su: &YearState) -> bool { su.kammacubala <= 207 }

/// Whether the avoman alone would ask for an extra day.
///
/// Eade phrases the common year rule as `<= 137`, which does not reproduce
/// the published calendars.
pub fn would_be_adhikavara(su: &YearState) -> bool {
  if is_suriya_leap(su) {
    su.avoman <= 126
  } else {
    su.avoman < 137
  }
}

pub fn adhikavara_exception(year: i32) -> Option<bool> {
  ADHIKAVARA_EXCEPTIONS
    .iter()
    .find(|(y, _)| *y == year)
    .map(|(_, v)| *v)
}

/// Position in the 19 year adhikamāsa cycle.
pub fn adhikamasa_cycle_pos(year: i32) -> i32 { (1984 - 19 * 10 - year).abs() % 19 + 1 }

/// Position in the 57 year adhikavāra cycle. 1984 = 1, 2040 = 57.
pub fn adhikavara_cycle_pos(year: i32) -> i32 { (1984 - 57 * 10 - year).abs() % 57 + 1 }

// ─── Almanac ─────────────────────────────────────────────────────────────────

/// Rule resolver with a per-year memo of [`YearState`].
///
/// Single-threaded by construction; create one per worker if needed.
#[derive(Debug, Default)]
pub struct Almanac {
  config: LeapConfig,
  years:  RefCell<HashMap<i32, YearState>>,
}

impl Almanac {
  pub fn new(config: LeapConfig) -> Self {
    Self {
      config,
      years: RefCell::new(HashMap::new()),
    }
  }

  pub fn config(&self) -> LeapConfig { self.config }

  /// The memoized year state for `year`.
  pub fn year(&self, year: i32) -> YearState {
    *self
      .years
      .borrow_mut()
      .entry(year)
      .or_insert_with(|| YearState::new(year))
  }

  /// True when `year` qualifies for an extra month and the next year does
  /// not. Two qualifying years in a row intercalate only the later one.
  pub fn is_adhikamasa(&self, year: i32) -> bool {
    would_be_adhikamasa(&self.year(year)) && !would_be_adhikamasa(&self.year(year + 1))
  }

  /// An extra day that would have landed in last year's adhikamāsa is
  /// carried into this year.
  pub fn has_carried_adhikavara(&self, year: i32) -> bool {
    self.is_adhikamasa(year - 1) && would_be_adhikavara(&self.year(year - 1))
  }

  pub fn is_adhikavara(&self, year: i32) -> bool {
    if self.config.use_exceptions
      && let Some(exception) = adhikavara_exception(year)
    {
      debug!(year, exception, "adhikavara exception applied");
      return exception;
    }

    if self.is_adhikamasa(year) {
      return false;
    }
    self.has_carried_adhikavara(year) || would_be_adhikavara(&self.year(year))
  }

  pub fn year_kind(&self, year: i32) -> YearKind {
    if self.is_adhikamasa(year) {
      YearKind::Adhikamasa
    } else if self.is_adhikavara(year) {
      YearKind::Adhikavara
    } else {
      YearKind::Common
    }
  }

  /// Length of the lunar year in days: 354, 355 or 384.
  pub fn year_length(&self, year: i32) -> i64 {
    match self.year_kind(year) {
      YearKind::Common => COMMON_YEAR_DAYS,
      YearKind::Adhikamasa => COMMON_YEAR_DAYS + 30,
      YearKind::Adhikavara => COMMON_YEAR_DAYS + 1,
    }
  }

  /// Years since the last adhikamāsa, or `None` if there was none within
  /// the lookback window.
  pub fn delta_adhikamasa(&self, year: i32) -> Option<i32> {
    (1..=ADHIKAMASA_LOOKBACK).find(|back| self.is_adhikamasa(year - back))
  }

  /// Years since the last adhikavāra, or `None` if there was none within
  /// the lookback window.
  pub fn delta_adhikavara(&self, year: i32) -> Option<i32> {
    (1..=ADHIKAVARA_LOOKBACK).find(|back| self.is_adhikavara(year - back))
  }
}
