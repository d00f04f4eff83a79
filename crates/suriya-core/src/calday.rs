//! Calendar days: every record dated on one day, gathered together.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
  Almanac,
  event::{Annotation, CalendarEvent, HalfMoonDay, HolidayEvent},
  feed::{AstroMoon, MoonPhaseFeed},
  generate::generate_solar_year,
  uposatha::ObservanceDay,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalDay {
  pub date:          NaiveDate,
  pub uposatha_moon: Option<ObservanceDay>,
  pub half_moon:     Option<HalfMoonDay>,
  pub astro_moon:    Option<AstroMoon>,
  pub major_events:  Vec<HolidayEvent>,
  pub events:        Vec<Annotation>,
}

impl CalDay {
  pub fn new(date: NaiveDate) -> Self {
    Self {
      date,
      uposatha_moon: None,
      half_moon: None,
      astro_moon: None,
      major_events: Vec::new(),
      events: Vec::new(),
    }
  }

  /// Whether nothing has been attached to the day.
  pub fn is_empty(&self) -> bool {
    self.uposatha_moon.is_none()
      && self.half_moon.is_none()
      && self.astro_moon.is_none()
      && self.major_events.is_empty()
      && self.events.is_empty()
  }

  /// The records of the day as events, astro moon included.
  pub fn calendar_events(&self) -> Vec<CalendarEvent> {
    let mut out = Vec::new();
    out.extend(self.uposatha_moon.clone().map(CalendarEvent::from));
    out.extend(self.half_moon.clone().map(CalendarEvent::from));
    out.extend(self.major_events.iter().cloned().map(CalendarEvent::from));
    out.extend(self.events.iter().cloned().map(CalendarEvent::from));
    out.extend(self.astro_moon.clone().map(CalendarEvent::from));
    out
  }
}

/// Gather `events` and `astro_moons` into one day per date, earliest first.
pub fn merge(
  events: impl IntoIterator<Item = CalendarEvent>,
  astro_moons: impl IntoIterator<Item = AstroMoon>,
) -> Vec<CalDay> {
  let mut days: BTreeMap<NaiveDate, CalDay> = BTreeMap::new();

  let all = events
    .into_iter()
    .chain(astro_moons.into_iter().map(CalendarEvent::from));
  for event in all {
    let date = event.date();
    let day = days.entry(date).or_insert_with(|| CalDay::new(date));
    event.attach_to(day);
  }

  days.into_values().collect()
}

/// The calendar days from `from` to `to` inclusive, with the astro moons of
/// `feed` alongside the computed records.
///
/// The feed only corroborates. If it fails the days are built without it.
pub fn cal_days<F: MoonPhaseFeed>(
  almanac: &Almanac,
  from: NaiveDate,
  to: NaiveDate,
  feed: &F,
) -> Vec<CalDay> {
  if from > to {
    return Vec::new();
  }

  let astro_moons = feed.moon_phases(from, to).unwrap_or_else(|e| {
    warn!(%from, %to, error = %e, "moon phase feed failed, continuing without it");
    Vec::new()
  });

  let events: Vec<CalendarEvent> = (from.year()..=to.year())
    .flat_map(|year| generate_solar_year(almanac, year))
    .filter(|e| (from..=to).contains(&e.date()))
    .collect();

  debug!(
    %from,
    %to,
    events = events.len(),
    astro = astro_moons.len(),
    "merging calendar days"
  );
  merge(events, astro_moons)
}
