//! Uposatha moondays and the sequencer that walks them forward.
//!
//! Uposathas alternate New and Full Moon. A Full Moon is always 15 days
//! after the preceding New Moon; a New Moon closes the month and comes 14 or
//! 15 days after the Full Moon depending on the month length.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::trace;

use crate::{Almanac, Error, Result};

// ─── Names ───────────────────────────────────────────────────────────────────

/// The moon phases an uposatha falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
  New,
  Full,
}

impl Phase {
  pub fn flip(self) -> Self {
    match self {
      Self::New => Self::Full,
      Self::Full => Self::New,
    }
  }

  /// "new" or "full", any case.
  pub fn parse(s: &str) -> Result<Self> {
    s.trim()
      .to_lowercase()
      .parse()
      .map_err(|_| Error::UnknownPhase(s.to_string()))
  }

  /// Capitalised for summaries: "New", "Full".
  pub fn title(self) -> &'static str {
    match self {
      Self::New => "New",
      Self::Full => "Full",
    }
  }
}

/// Which tradition's calendar a record belongs to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CalendarVariant {
  #[default]
  Mahanikaya,
  Dhammayut,
  SriLanka,
  Myanmar,
}

impl CalendarVariant {
  pub fn title(self) -> &'static str {
    match self {
      Self::Mahanikaya => "Mahānikāya",
      Self::Dhammayut => "Dhammayut",
      Self::SriLanka => "Sri Lanka",
      Self::Myanmar => "Myanmar",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    s.to_lowercase()
      .parse()
      .map_err(|_| Error::UnknownCalendar(s.to_string()))
  }
}

/// How much trust a record deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
  #[default]
  Draft,
  Predicted,
  Confirmed,
}

/// The three seasons of the lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Season {
  /// Cold season, months 1–4.
  Hemanta = 1,
  /// Hot season, months 5–8 (and the 2nd Āsāḷha).
  Gimha = 2,
  /// Rainy season, months 9–12.
  Vassana = 3,
}

impl Season {
  pub fn next(self) -> Self {
    match self {
      Self::Hemanta => Self::Gimha,
      Self::Gimha => Self::Vassana,
      Self::Vassana => Self::Hemanta,
    }
  }

  pub fn index(self) -> u8 { self as u8 }
}

/// The full moon holidays, in lunar year order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Festival {
  Magha,
  Visakha,
  Asalha,
  Pavarana,
}

impl Festival {
  /// The festival falling on the Full Moon of `month`, if any.
  ///
  /// In adhikamāsa years Māgha and Visākha Pūjā move one month later and
  /// Āsāḷha Pūjā falls in the 2nd Āsāḷha.
  pub fn for_month(month: u8, adhikamasa: bool) -> Option<Self> {
    match (adhikamasa, month) {
      (true, 4) | (false, 3) => Some(Self::Magha),
      (true, 7) | (false, 6) => Some(Self::Visakha),
      (true, 13) | (false, 8) => Some(Self::Asalha),
      (_, 11) => Some(Self::Pavarana),
      _ => None,
    }
  }

  pub fn title(self) -> &'static str {
    match self {
      Self::Magha => "Māgha Pūjā",
      Self::Visakha => "Visākha Pūjā",
      Self::Asalha => "Āsāḷha Pūjā",
      Self::Pavarana => "Pavāraṇā Day",
    }
  }
}

/// Lunar month names, indexed from 1. Month 13 is the inserted 2nd Āsāḷha.
pub const MONTH_NAMES: [&str; 13] = [
  "māgasira",
  "phussa",
  "māgha",
  "phagguna",
  "citta",
  "visākha",
  "jeṭṭha",
  "āsāḷha",
  "sāvaṇa",
  "bhaddapada",
  "assayuja",
  "kattika",
  "2nd āsāḷha",
];

/// The same names without diacritics, for lookups from plain text.
const MONTH_KEYS: [&str; 13] = [
  "magasira",
  "phussa",
  "magha",
  "phagguna",
  "citta",
  "visakha",
  "jettha",
  "asalha",
  "savana",
  "bhaddapada",
  "assayuja",
  "kattika",
  "2nd asalha",
];

pub fn month_name(month: u8) -> Option<&'static str> {
  MONTH_NAMES.get(usize::from(month).checked_sub(1)?).copied()
}

/// Month number for a name, with or without diacritics.
pub fn month_from_name(name: &str) -> Result<u8> {
  let name = name.trim().to_lowercase();
  MONTH_NAMES
    .iter()
    .position(|n| *n == name)
    .or_else(|| MONTH_KEYS.iter().position(|n| *n == name))
    .map(|i| i as u8 + 1)
    .ok_or(Error::UnknownMonth(name))
}

// ─── ObservanceDay ───────────────────────────────────────────────────────────

/// One uposatha. Created from its predecessor by [`UposathaSequencer::next`]
/// and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservanceDay {
  pub date:           NaiveDate,
  pub calendar:       CalendarVariant,
  pub status:         Status,
  /// Only New or Full; the half moons are derived.
  pub phase:          Phase,
  pub event:          Option<Festival>,
  /// 1 of 8 in Hemanta.
  pub season_number:  u8,
  /// Number of uposathas in the season, 8 or 10.
  pub season_total:   u8,
  /// Days since the previous uposatha, 14 or 15.
  pub uposatha_days:  u8,
  /// Days in the lunar month, 29 or 30.
  pub month_days:     u8,
  /// 1–12, 13 is the 2nd Āsāḷha. Odd months have 30 days.
  pub lunar_month:    u8,
  pub lunar_season:   Season,
  /// Buddhist Era year of the lunar year.
  pub lunar_year:     i32,
  pub has_adhikavara: bool,
}

impl ObservanceDay {
  /// The last uposatha of a lunar year: Kattika Full Moon on `date`.
  pub fn kattika(date: NaiveDate, lunar_year: i32) -> Self {
    Self {
      date,
      calendar: CalendarVariant::Mahanikaya,
      status: Status::Draft,
      phase: Phase::Full,
      event: None,
      season_number: 8,
      season_total: 8,
      uposatha_days: 15,
      month_days: 29,
      lunar_month: 12,
      lunar_season: Season::Vassana,
      lunar_year,
      has_adhikavara: false,
    }
  }

  pub fn summary(&self) -> String {
    format!(
      "{} Moon - {} day {} {}/{}",
      self.phase.title(),
      self.uposatha_days,
      self.lunar_season,
      self.season_number,
      self.season_total,
    )
  }
}

impl fmt::Display for ObservanceDay {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.summary()) }
}

// ─── Sequencer ───────────────────────────────────────────────────────────────

/// Produces each uposatha from the previous one.
///
/// The intercalation rules are those of the calendar year the previous
/// uposatha falls in.
#[derive(Debug, Clone, Copy)]
pub struct UposathaSequencer<'a> {
  almanac: &'a Almanac,
}

impl<'a> UposathaSequencer<'a> {
  pub fn new(almanac: &'a Almanac) -> Self { Self { almanac } }

  /// `None` once the date would pass the last representable day.
  pub fn next(&self, last: &ObservanceDay) -> Option<ObservanceDay> {
    let year = last.date.year();
    let adhikamasa = self.almanac.is_adhikamasa(year);
    let adhikavara = self.almanac.is_adhikavara(year);

    let phase = last.phase.flip();

    let next = match phase {
      // A Full Moon stays in the month, season and year of the New Moon
      // before it.
      Phase::Full => {
        let uposatha_days = 15;
        ObservanceDay {
          date: last.date.checked_add_days(Days::new(uposatha_days))?,
          calendar: CalendarVariant::Mahanikaya,
          status: Status::Draft,
          phase,
          event: Festival::for_month(last.lunar_month, adhikamasa),
          season_number: last.season_number + 1,
          season_total: last.season_total,
          uposatha_days: uposatha_days as u8,
          month_days: last.month_days,
          lunar_month: last.lunar_month,
          lunar_season: last.lunar_season,
          lunar_year: last.lunar_year,
          // the extra day only lands on New Moons
          has_adhikavara: false,
        }
      }

      // A New Moon begins a new month.
      Phase::New => {
        let lunar_month = match last.lunar_month {
          13 => 9,
          8 if adhikamasa => 13,
          12 => 1,
          m => m + 1,
        };

        let has_adhikavara = adhikavara && lunar_month == 8;
        let month_days: u8 = if has_adhikavara || lunar_month % 2 == 1 { 30 } else { 29 };
        let uposatha_days = month_days - 15;

        // The hot season holds ten uposathas when the 2nd Āsāḷha is in it.
        let season_total =
          if adhikamasa && matches!(lunar_month, 5..=8 | 13) { 10 } else { 8 };

        let (season_number, lunar_season, lunar_year) = if last.season_number < last.season_total {
          (last.season_number + 1, last.lunar_season, last.lunar_year)
        } else if last.lunar_month == 12 {
          (1, Season::Hemanta, last.lunar_year + 1)
        } else {
          (1, last.lunar_season.next(), last.lunar_year)
        };

        ObservanceDay {
          date: last.date.checked_add_days(Days::new(u64::from(uposatha_days)))?,
          calendar: CalendarVariant::Mahanikaya,
          status: Status::Draft,
          phase,
          event: None,
          season_number,
          season_total,
          uposatha_days,
          month_days,
          lunar_month,
          lunar_season,
          lunar_year,
          has_adhikavara,
        }
      }
    };

    trace!(date = %next.date, phase = %next.phase, month = next.lunar_month, "next uposatha");
    Some(next)
  }

  /// Every uposatha after `seed`, up to the last representable date.
  pub fn iter(&self, seed: ObservanceDay) -> Uposathas<'a> {
    Uposathas {
      sequencer: *self,
      last:      seed,
    }
  }
}

/// Iterator returned by [`UposathaSequencer::iter`].
#[derive(Debug, Clone)]
pub struct Uposathas<'a> {
  sequencer: UposathaSequencer<'a>,
  last:      ObservanceDay,
}

impl Iterator for Uposathas<'_> {
  type Item = ObservanceDay;

  fn next(&mut self) -> Option<Self::Item> {
    let next = self.sequencer.next(&self.last)?;
    self.last = next.clone();
    Some(next)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
  }

  #[test]
  fn phases_alternate_and_dates_increase() {
    let almanac = Almanac::default();
    let seq = UposathaSequencer::new(&almanac);
    let seed = ObservanceDay::kattika(ymd(2014, 11, 6), 2557);

    let mut last = seed.clone();
    for next in seq.iter(seed).take(200) {
      assert_eq!(next.phase, last.phase.flip());
      assert!(next.date > last.date);
      last = next;
    }
  }

  #[test]
  fn new_year_begins_after_kattika() {
    let almanac = Almanac::default();
    let seq = UposathaSequencer::new(&almanac);
    let kattika = ObservanceDay::kattika(ymd(2014, 11, 6), 2557);

    let new_moon = seq.next(&kattika).unwrap();
    assert_eq!(new_moon.phase, Phase::New);
    assert_eq!(new_moon.date, ymd(2014, 11, 21));
    assert_eq!(new_moon.lunar_month, 1);
    assert_eq!(new_moon.lunar_season, Season::Hemanta);
    assert_eq!(new_moon.lunar_year, 2558);
    assert_eq!(new_moon.season_number, 1);
    assert_eq!(new_moon.month_days, 30);
    assert_eq!(new_moon.uposatha_days, 15);

    let full_moon = seq.next(&new_moon).unwrap();
    assert_eq!(full_moon.phase, Phase::Full);
    assert_eq!(full_moon.date, ymd(2014, 12, 6));
    assert_eq!(full_moon.season_number, 2);
    assert_eq!(full_moon.lunar_month, 1);
  }

  #[test]
  fn second_asalha_follows_asalha_in_adhikamasa_year() {
    let almanac = Almanac::default();
    let seq = UposathaSequencer::new(&almanac);
    let seed = ObservanceDay::kattika(ymd(2014, 11, 6), 2557);

    let asalha_full = seq
      .iter(seed)
      .find(|u| u.phase == Phase::Full && u.event == Some(Festival::Asalha))
      .expect("asalha puja");
    assert_eq!(asalha_full.date, ymd(2015, 7, 30));
    assert_eq!(asalha_full.lunar_month, 13);
    assert_eq!(asalha_full.lunar_season, Season::Gimha);
    assert_eq!(asalha_full.season_number, 10);
    assert_eq!(asalha_full.season_total, 10);
  }

  #[test]
  fn adhikavara_lengthens_the_eighth_month() {
    let almanac = Almanac::default();
    let seq = UposathaSequencer::new(&almanac);
    // Kattika Full Moon 2015, the lunar year ending before the 2016 extra day
    let seed = ObservanceDay::kattika(ymd(2015, 11, 25), 2558);

    let eighth = seq
      .iter(seed)
      .find(|u| u.phase == Phase::New && u.lunar_month == 8)
      .expect("8th month");
    assert!(eighth.has_adhikavara);
    assert_eq!(eighth.month_days, 30);
    assert_eq!(eighth.uposatha_days, 15);
  }

  #[test]
  fn sequence_ends_at_the_last_date() {
    let almanac = Almanac::default();
    let seq = UposathaSequencer::new(&almanac);
    let last_day = NaiveDate::MAX.checked_sub_days(Days::new(20)).unwrap();
    let seed = ObservanceDay::kattika(last_day, last_day.year() + 543);

    // one 15 day New Moon fits, the Full Moon after it does not
    let tail: Vec<_> = seq.iter(seed).collect();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].phase, Phase::New);
    assert_eq!(tail[0].date, last_day + Days::new(15));
  }

  #[test]
  fn festivals_shift_in_adhikamasa_years() {
    assert_eq!(Festival::for_month(3, false), Some(Festival::Magha));
    assert_eq!(Festival::for_month(4, true), Some(Festival::Magha));
    assert_eq!(Festival::for_month(3, true), None);
    assert_eq!(Festival::for_month(8, false), Some(Festival::Asalha));
    assert_eq!(Festival::for_month(8, true), None);
    assert_eq!(Festival::for_month(13, true), Some(Festival::Asalha));
    assert_eq!(Festival::for_month(11, true), Some(Festival::Pavarana));
    assert_eq!(Festival::for_month(42, false), None);
  }

  #[test]
  fn summary_reads_like_a_calendar_entry() {
    let day = ObservanceDay::kattika(ymd(2015, 11, 25), 2558);
    assert_eq!(day.summary(), "Full Moon - 15 day Vassana 8/8");
  }

  #[test]
  fn month_names_round_trip() {
    assert_eq!(month_name(8), Some("āsāḷha"));
    assert_eq!(month_name(0), None);
    assert_eq!(month_name(14), None);
    assert_eq!(month_from_name("Magha").unwrap(), 3);
    assert_eq!(month_from_name("2nd āsāḷha").unwrap(), 13);
    assert!(month_from_name("thermidor").is_err());
  }

  #[test]
  fn calendar_variants_parse() {
    assert_eq!(CalendarVariant::parse("Mahanikaya").unwrap(), CalendarVariant::Mahanikaya);
    assert_eq!(CalendarVariant::parse("srilanka").unwrap(), CalendarVariant::SriLanka);
    assert!(CalendarVariant::parse("gregorian").is_err());
  }

  #[test]
  fn phases_parse() {
    assert_eq!(Phase::parse("Full").unwrap(), Phase::Full);
    assert_eq!(Phase::parse(" new ").unwrap(), Phase::New);
    assert!(matches!(Phase::parse("gibbous"), Err(Error::UnknownPhase(p)) if p == "gibbous"));
  }
}
