//! Uposathas, half moons and holidays of one solar (Gregorian) year.
//!
//! The lunar cycle is anchored on a known Kattika Full Moon and stepped a
//! lunar year at a time to the Kattika before the requested year. From there
//! the sequencer walks forward through the year.

use chrono::{Datelike, Days, NaiveDate, TimeDelta};
use tracing::{debug, warn};

use crate::{
  Almanac, BE_DIFF,
  event::{CalendarEvent, HalfMoonDay, HolidayEvent},
  leap::{COMMON_YEAR_DAYS, YearKind},
  uposatha::{CalendarVariant, Festival, ObservanceDay, Phase, Status, UposathaSequencer},
};

/// Horakhun of 1963-07-05, the day before Āsāḷha Pūjā in Eade's example.
pub const HORAKHUN_REF: i64 = 484_049;

/// Upper bound on the lunar years stepped from the Kattika reference.
pub const MAX_ANCHOR_STEPS: i32 = 5000;

/// First and last CE years the generator reaches from the Kattika reference.
pub const MIN_YEAR: i32 = 2016 - MAX_ANCHOR_STEPS;
pub const MAX_YEAR: i32 = 2015 + MAX_ANCHOR_STEPS;

/// The reference Kattika Full Moon all anchors are stepped from.
pub fn kattika_reference() -> NaiveDate {
  NaiveDate::from_ymd_opt(2015, 11, 25).expect("2015-11-25 is a valid date")
}

fn horakhun_reference() -> NaiveDate {
  NaiveDate::from_ymd_opt(1963, 7, 5).expect("1963-07-05 is a valid date")
}

/// The calendar date of a horakhun (elapsed day count of the era).
pub fn horakhun_to_date(horakhun: i64) -> Option<NaiveDate> {
  horakhun_reference().checked_add_signed(TimeDelta::try_days(horakhun - HORAKHUN_REF)?)
}

/// The Kattika Full Moon in the year before `solar_year`.
///
/// Stepping forward adds the length of the lunar year being entered;
/// stepping back subtracts the length of the one being left. `None` past
/// [`MAX_ANCHOR_STEPS`] lunar years from the reference.
pub fn previous_kattika(almanac: &Almanac, solar_year: i32) -> Option<NaiveDate> {
  if !(MIN_YEAR..=MAX_YEAR).contains(&solar_year) {
    warn!(solar_year, "kattika search out of range");
    return None;
  }

  let target = solar_year - 1;
  let mut date = kattika_reference();
  let mut year = date.year();
  let direction = (target - year).signum();

  while year != target {
    date = if direction > 0 {
      date.checked_add_days(Days::new(almanac.year_length(year + 1) as u64))?
    } else {
      date.checked_sub_days(Days::new(almanac.year_length(year) as u64))?
    };
    year += direction;
  }

  Some(date)
}

/// Āsāḷha Pūjā of `year` without walking the uposathas: four pairs of 29 and
/// 30 day months after Kattika, plus the 2nd Āsāḷha or the extra day.
pub fn asalha_puja(almanac: &Almanac, year: i32) -> Option<NaiveDate> {
  let extra = match almanac.year_kind(year) {
    YearKind::Common => 0,
    YearKind::Adhikamasa => 30,
    YearKind::Adhikavara => 1,
  };
  let days = 4 * COMMON_YEAR_DAYS / 6 + extra;
  previous_kattika(almanac, year)?.checked_add_days(Days::new(days as u64))
}

/// Holidays falling on a Mahānikāya Full Moon uposatha.
pub fn holiday_events(uposatha: &ObservanceDay) -> Vec<HolidayEvent> {
  if uposatha.phase != Phase::Full || uposatha.calendar != CalendarVariant::Mahanikaya {
    return Vec::new();
  }
  let Some(festival) = uposatha.event else {
    return Vec::new();
  };

  let date = uposatha.date;
  let calendar = uposatha.calendar;
  let mut events = vec![HolidayEvent::new(date, calendar, festival.title())];
  match festival {
    Festival::Asalha => {
      events.push(HolidayEvent::new(date + Days::new(1), calendar, "First day of Vassa"));
    }
    Festival::Pavarana => {
      events.push(HolidayEvent::new(date, calendar, "Last day of Vassa"));
    }
    Festival::Magha | Festival::Visakha => {}
  }
  events
}

/// Every uposatha, half moon and holiday dated in `solar_year`, in the order
/// the sequencer produces them. Empty outside [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn generate_solar_year(almanac: &Almanac, solar_year: i32) -> Vec<CalendarEvent> {
  let Some(kattika) = previous_kattika(almanac, solar_year) else {
    return Vec::new();
  };
  debug!(solar_year, %kattika, "generating solar year");

  let seed = ObservanceDay::kattika(kattika, kattika.year() + BE_DIFF);
  let sequencer = UposathaSequencer::new(almanac);

  let mut events = Vec::new();
  for uposatha in sequencer.iter(seed) {
    if uposatha.date.year() > solar_year {
      break;
    }

    let uposatha = ObservanceDay {
      status: Status::Confirmed,
      ..uposatha
    };
    let half_moon = HalfMoonDay::after(&uposatha);

    let mut holidays = Vec::new();
    if uposatha.date.year() == solar_year {
      holidays = holiday_events(&uposatha);
      events.push(CalendarEvent::from(uposatha));
    }
    if half_moon.date.year() == solar_year {
      events.push(CalendarEvent::from(half_moon));
    }
    events.extend(holidays.into_iter().map(CalendarEvent::from));
  }

  events
}
