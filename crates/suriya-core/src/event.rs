//! Everything that can be put on a calendar day.
//!
//! Exporters only need [`CalendarEvent::date`] and
//! [`CalendarEvent::summary`]: each record becomes one all-day entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
  calday::CalDay,
  feed::AstroMoon,
  uposatha::{CalendarVariant, ObservanceDay, Phase},
};

// ─── Half moons ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum HalfPhase {
  Waxing,
  Waning,
}

impl HalfPhase {
  /// The half moon that follows an uposatha of `phase`.
  pub fn after(phase: Phase) -> Self {
    match phase {
      Phase::New => Self::Waxing,
      Phase::Full => Self::Waning,
    }
  }
}

/// The quarter moon eight days after an uposatha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfMoonDay {
  pub date:  NaiveDate,
  pub phase: HalfPhase,
}

impl HalfMoonDay {
  pub const DAYS_AFTER_UPOSATHA: u64 = 8;

  pub fn after(uposatha: &ObservanceDay) -> Self {
    Self {
      date:  uposatha.date + chrono::Days::new(Self::DAYS_AFTER_UPOSATHA),
      phase: HalfPhase::after(uposatha.phase),
    }
  }

  pub fn summary(&self) -> String { format!("{} Moon", self.phase) }
}

// ─── Holidays and notes ──────────────────────────────────────────────────────

/// A major observance: Māgha, Visākha, Āsāḷha Pūjā, Pavāraṇā and the Vassa
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEvent {
  pub date:        NaiveDate,
  pub calendar:    CalendarVariant,
  pub summary:     String,
  pub description: String,
}

impl HolidayEvent {
  pub fn new(date: NaiveDate, calendar: CalendarVariant, summary: &str) -> Self {
    Self {
      date,
      calendar,
      summary: summary.to_string(),
      description: summary.to_string(),
    }
  }
}

/// A free-form note for a date: an anniversary, a Kathina, a remark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
  pub date:        NaiveDate,
  pub calendar:    CalendarVariant,
  pub summary:     String,
  pub description: String,
}

// ─── The sum type ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CalendarEvent {
  Uposatha(ObservanceDay),
  HalfMoon(HalfMoonDay),
  Major(HolidayEvent),
  Note(Annotation),
  Astro(AstroMoon),
}

impl CalendarEvent {
  pub fn date(&self) -> NaiveDate {
    match self {
      Self::Uposatha(u) => u.date,
      Self::HalfMoon(h) => h.date,
      Self::Major(e) => e.date,
      Self::Note(n) => n.date,
      Self::Astro(a) => a.date,
    }
  }

  pub fn summary(&self) -> String {
    match self {
      Self::Uposatha(u) => u.summary(),
      Self::HalfMoon(h) => h.summary(),
      Self::Major(e) => e.summary.clone(),
      Self::Note(n) => n.summary.clone(),
      Self::Astro(a) => a.summary(),
    }
  }

  /// Put the record in its slot on `day`. Singular slots are overwritten,
  /// lists are appended to.
  pub fn attach_to(self, day: &mut CalDay) {
    match self {
      Self::Uposatha(u) => day.uposatha_moon = Some(u),
      Self::HalfMoon(h) => day.half_moon = Some(h),
      Self::Major(e) => day.major_events.push(e),
      Self::Note(n) => day.events.push(n),
      Self::Astro(a) => day.astro_moon = Some(a),
    }
  }
}

impl From<ObservanceDay> for CalendarEvent {
  fn from(u: ObservanceDay) -> Self { Self::Uposatha(u) }
}

impl From<HalfMoonDay> for CalendarEvent {
  fn from(h: HalfMoonDay) -> Self { Self::HalfMoon(h) }
}

impl From<HolidayEvent> for CalendarEvent {
  fn from(e: HolidayEvent) -> Self { Self::Major(e) }
}

impl From<Annotation> for CalendarEvent {
  fn from(n: Annotation) -> Self { Self::Note(n) }
}

impl From<AstroMoon> for CalendarEvent {
  fn from(a: AstroMoon) -> Self { Self::Astro(a) }
}
