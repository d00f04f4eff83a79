//! iCalendar export of uposatha calendars.
//!
//! Turns merged [`CalDay`](suriya_core::calday::CalDay)s into an RFC 5545
//! `VCALENDAR` with one all-day `VEVENT` per uposatha, half moon, holiday and
//! note. Astronomical moons are left out: they corroborate the calendar, they
//! are not part of it.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use suriya_core::{Almanac, calday::cal_days, feed::NoFeed};
//! use suriya_ical::{CalendarMeta, serialize};
//!
//! let from = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
//! let to = NaiveDate::from_ymd_opt(2015, 12, 31).unwrap();
//! let days = cal_days(&Almanac::default(), from, to, &NoFeed);
//! print!("{}", serialize(&days, &CalendarMeta::default()));
//! ```

mod serialize;

use serde::{Deserialize, Serialize};
use suriya_core::uposatha::CalendarVariant;

pub use serialize::{serialize, serialize_at};

// ─── Calendar header ─────────────────────────────────────────────────────────

/// Properties of the `VCALENDAR` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMeta {
  /// `NAME` and `X-WR-CALNAME`.
  pub name:             String,
  /// `DESCRIPTION` and `X-WR-CALDESC`.
  pub description:      String,
  pub prod_id:          String,
  pub url:              Option<String>,
  /// `R:G:B`.
  pub color:            String,
  /// ISO 8601 duration, e.g. `PT12H`.
  pub refresh_interval: String,
}

impl CalendarMeta {
  pub const SAFFRON: &'static str = "244:196:48";
  pub const PUBLISHED_AT: &'static str = "http://splendidmoons.github.io/ical";

  pub fn for_calendar(calendar: CalendarVariant) -> Self {
    let title = calendar.title();
    let name = format!("Uposatha Moondays ({title})");
    Self {
      description:      name.clone(),
      prod_id:          format!("Uposatha Moondays {title} EN"),
      url:              Some(format!("{}/{calendar}.ical", Self::PUBLISHED_AT)),
      color:            Self::SAFFRON.to_string(),
      refresh_interval: "PT12H".to_string(),
      name,
    }
  }

  /// Use `name` for both the name and the description.
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self.description = self.name.clone();
    self
  }
}

impl Default for CalendarMeta {
  fn default() -> Self { Self::for_calendar(CalendarVariant::default()) }
}
