//! Era-relative values for the astronomical new year of a calendar year.
//!
//! Follows Eade's "Rules for Interpolation in the Thai Calendar". The worked
//! example there is CE 1963 (CS 1325).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BE_DIFF, CS_DIFF};

/// South Asian traditional number of days in 800 years.
pub const ERA_DAYS: i64 = 292_207;
pub const ERA_YEARS: i64 = 800;
/// Horakhun at the beginning of the CS era.
pub const ERA_HORAKHUN: i64 = 373;
pub const ERA_UCCABALA: i64 = 2611;
pub const ERA_AVOMAN: i64 = 650;
pub const ERA_MASAKEN: i64 = 0;
pub const MONTH_LENGTH: i64 = 30;
/// For every 692 solar days there are 703 tithi.
pub const CYCLE_SOLAR: i64 = 692;
pub const CYCLE_DAILY: i64 = 11;
/// Daily increase of the kammacubala.
pub const KAMMACUBALA_DAILY: i64 = 800;
/// Period of the lunar apogee in days.
pub const UCCABALA_CYCLE: i64 = 3232;

/// The values of one year's astronomical New Year. Pure function of the CE
/// year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearState {
  /// Common Era.
  pub year:        i32,
  /// Buddhist Era, CE + 543.
  pub be_year:     i32,
  /// Chulasakkarat Era, CE − 638.
  pub cs_year:     i32,
  /// Elapsed days of the era (ahargana).
  pub horakhun:    i64,
  /// Remaining 800ths of a day.
  pub kammacubala: i64,
  /// Age of the Moon's apogee.
  pub uccabala:    i64,
  /// Residue for the Moon's mean motion.
  pub avoman:      i64,
  /// Elapsed months of the era.
  pub masaken:     i64,
  /// Age of the Moon at the start of the year.
  pub tithi:       i64,
}

impl YearState {
  pub fn new(year: i32) -> Self {
    let cs_year = year - CS_DIFF;

    let a = i64::from(cs_year) * ERA_DAYS + ERA_HORAKHUN;
    // +1 is a constant correction
    let horakhun = a.div_euclid(KAMMACUBALA_DAILY) + 1;
    let kammacubala = KAMMACUBALA_DAILY - a.rem_euclid(KAMMACUBALA_DAILY);
    let uccabala = (horakhun + ERA_UCCABALA).rem_euclid(UCCABALA_CYCLE);

    let (avoman, masaken, tithi) = lunar_residues(horakhun);

    Self {
      year,
      be_year: year + BE_DIFF,
      cs_year,
      horakhun,
      kammacubala,
      uccabala,
      avoman,
      masaken,
      tithi,
    }
  }
}

/// Avoman, masaken and tithi for a given horakhun. Shared with the per-day
/// derivation.
pub(crate) fn lunar_residues(horakhun: i64) -> (i64, i64, i64) {
  let b = horakhun * CYCLE_DAILY + ERA_AVOMAN;
  let avoman = b.rem_euclid(CYCLE_SOLAR);
  let c = b.div_euclid(CYCLE_SOLAR) + ERA_MASAKEN + horakhun;
  (
    avoman,
    c.div_euclid(MONTH_LENGTH),
    c.rem_euclid(MONTH_LENGTH),
  )
}

impl fmt::Display for YearState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "CE: {}", self.year)?;
    writeln!(f, "BE: {}", self.be_year)?;
    writeln!(f, "CS: {}", self.cs_year)?;
    writeln!(f, "Horakhun: {}", self.horakhun)?;
    writeln!(f, "Kammacubala: {}", self.kammacubala)?;
    writeln!(f, "Uccabala: {}", self.uccabala)?;
    writeln!(f, "Avoman: {}", self.avoman)?;
    writeln!(f, "Masaken: {}", self.masaken)?;
    writeln!(f, "Tithi: {}", self.tithi)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn interpolation_example_1963() {
    let su = YearState::new(1963);
    assert_eq!(su.be_year, 2506);
    assert_eq!(su.cs_year, 1325);
    assert_eq!(su.horakhun, 483_969);
    assert_eq!(su.kammacubala, 552);
    assert_eq!(su.uccabala, 1780);
    assert_eq!(su.avoman, 61);
    assert_eq!(su.masaken, 16_388);
    assert_eq!(su.tithi, 23);
  }

  #[test]
  fn calendrical_example_1496() {
    let su = YearState::new(1496);
    assert_eq!(su.cs_year, 858);
    assert_eq!(su.horakhun, 313_393);
    assert_eq!(su.kammacubala, 421);
    assert_eq!(su.uccabala, 2500);
    assert_eq!(su.avoman, 429);
    assert_eq!(su.masaken, 10_612);
    assert_eq!(su.tithi, 15);
  }

  #[test]
  fn consecutive_years_differ_by_a_solar_year() {
    let a = YearState::new(2015);
    let b = YearState::new(2016);
    let days = b.horakhun - a.horakhun;
    assert!(days == 365 || days == 366, "got {days}");
  }

  #[test]
  fn years_before_the_era_stay_in_range() {
    let su = YearState::new(500);
    assert!(su.cs_year < 0);
    assert!((1..=800).contains(&su.kammacubala));
    assert!((0..30).contains(&su.tithi));
    assert!((0..692).contains(&su.avoman));
  }

  #[test]
  fn summary_lists_every_value() {
    let text = YearState::new(1963).to_string();
    assert!(text.starts_with("CE: 1963\n"));
    assert!(text.contains("Horakhun: 483969\n"));
    assert!(text.ends_with("Tithi: 23\n"));
  }
}
