//! Mean and true positions of the Sun and Moon on a day of the lunar year.
//!
//! Sample values in the comments are for CE 1963, day 103 (Āsāḷha 15), the
//! example Eade works through in "Rules for Interpolation in the Thai
//! Calendar".

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{
  CS_DIFF,
  degree::{Ral, normalize, ral_to_degree},
  year::{
    ERA_DAYS, ERA_HORAKHUN, ERA_UCCABALA, ERA_YEARS, KAMMACUBALA_DAILY,
    UCCABALA_CYCLE, YearState, lunar_residues,
  },
};

/// Geographic longitude correction for the Sun, in arcminutes.
const SUN_CORRECTION_LIPDA: i32 = 3;
/// Geographic longitude correction for the Moon, in arcminutes.
const MOON_CORRECTION_LIPDA: i32 = 40;

/// The state of one day, counted from the start of the lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayState {
  /// Common Era.
  pub year:        i32,
  pub cs_year:     i32,
  /// nth day of the lunar year.
  pub day:         i64,
  pub horakhun:    i64,
  pub kammacubala: i64,
  pub uccabala:    i64,
  pub avoman:      i64,
  pub masaken:     i64,
  pub tithi:       i64,
  /// Positions in degrees.
  pub mean_sun:    f64,
  pub true_sun:    f64,
  pub mean_moon:   f64,
  pub true_moon:   f64,
  /// Lunar mansion, 1 to 27 plus the fraction travelled through it.
  pub raek:        f64,
}

impl DayState {
  pub fn new(year: i32, day: i64) -> Self { Self::from_year(&YearState::new(year), day) }

  pub fn from_year(su: &YearState, day: i64) -> Self {
    let cs_year = su.year - CS_DIFF;
    // Same as the difference of the two horakhun values.
    let elapsed = day - su.tithi;

    let horakhun = su.horakhun + elapsed;
    let kammacubala = KAMMACUBALA_DAILY
      - (i64::from(cs_year) * ERA_DAYS + ERA_HORAKHUN).rem_euclid(ERA_YEARS)
      + elapsed * KAMMACUBALA_DAILY;
    let uccabala = (horakhun + ERA_UCCABALA).rem_euclid(UCCABALA_CYCLE);
    let (avoman, masaken, tithi) = lunar_residues(horakhun);

    // ── Mean and true Sun ───────────────────────────────────────────────

    // interval from the start of the year, in 800ths of a day
    let a = (elapsed * ERA_YEARS + su.kammacubala) as f64;
    // a = 64552, b = 79.5282796100025
    let b = a / ERA_DAYS as f64 * 360.0;

    // Going through Ral and back reproduces Eade's values; b − 3/60 does not.
    let ral = Ral::from_degree(b);
    let mean_sun = ral_to_degree(ral.rasi, ral.angsa, ral.lipda - SUN_CORRECTION_LIPDA);
    // mean_sun = 79.4666

    // 80° is the Sun's apogee in the Calendrical tables.
    let equation = (134.0 * to_radians((mean_sun - 80.0).abs()).sin()).floor();
    // equation = 1
    let true_sun = (mean_sun * 10000.0 + equation * 10000.0 / 60.0).floor() / 10000.0;
    // true_sun = 79.4832, 2;19:29

    // ── Mean and true Moon ──────────────────────────────────────────────

    let motion = (avoman as f64 + (avoman as f64 / 25.0).floor()) / 60.0;
    let mean_moon = normalize(
      true_sun + motion + (tithi as f64) * 12.0 - ral_to_degree(0, 0, MOON_CORRECTION_LIPDA),
    );
    // mean_moon = 251.1166

    // ×30 to the Ral scale, to arcmin, +2 arcmin, back to degrees
    let mean_uccabala = ((((su.uccabala + elapsed) as f64 * 3.0 * 30.0) / 808.0) * 60.0 + 2.0) / 60.0;
    // mean_uccabala = 207.2115, 6;27:12

    // Eade prints 1;3:55 for this difference, a typo for 1;13:54.
    let anomaly = mean_moon - mean_uccabala;
    let equation = 296.0 * to_radians(anomaly).sin() / 60.0;
    let true_moon = ((mean_moon - equation) * 10000.0).floor() / 10000.0;
    // true_moon = 247.6955, 8;7:41

    // one raek is (0; 13 : 20), 360° / 27 mansions
    let raek = true_moon / ral_to_degree(0, 13, 20) + 1.0;
    // raek = 19.5772, 0;19:34

    Self {
      year: su.year,
      cs_year,
      day,
      horakhun,
      kammacubala,
      uccabala,
      avoman,
      masaken,
      tithi,
      mean_sun,
      true_sun,
      mean_moon,
      true_moon,
      raek,
    }
  }

  /// Index of the lunar mansion the Moon occupies, 1 to 27.
  pub fn mansion(&self) -> u8 { self.raek.floor().clamp(1.0, 27.0) as u8 }
}

fn to_radians(degree: f64) -> f64 { degree * PI / 180.0 }
