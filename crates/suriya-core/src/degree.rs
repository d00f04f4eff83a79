//! Rasi / angsa / lipda ("Ral") angle notation.
//!
//! `(x; y : z)` in the historical tables means `30·60·x + 60·y + z`
//! arcminutes: `x` counts 30° signs, `y` whole degrees inside the sign and
//! `z` arcminutes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An angle in rasi (30° units), angsa (degrees) and lipda (arcminutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ral {
  pub rasi:  i32,
  pub angsa: i32,
  pub lipda: i32,
}

impl Ral {
  pub const fn new(rasi: i32, angsa: i32, lipda: i32) -> Self {
    Self { rasi, angsa, lipda }
  }

  /// Split a fractional-degree angle into its Ral parts.
  pub fn from_degree(degree: f64) -> Self {
    let whole = degree.floor();
    Self {
      rasi:  (degree / 30.0).floor() as i32,
      angsa: (whole as i64).rem_euclid(30) as i32,
      lipda: ((degree - whole) * 60.0).floor() as i32,
    }
  }

  /// Back to degrees, truncated to four decimal places.
  pub fn to_degree(self) -> f64 { ral_to_degree(self.rasi, self.angsa, self.lipda) }
}

impl fmt::Display for Ral {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{};{}:{}", self.rasi, self.angsa, self.lipda)
  }
}

/// Shorthand for [`Ral::from_degree`].
pub fn to_ral(degree: f64) -> Ral { Ral::from_degree(degree) }

/// Convert Ral parts to degrees.
///
/// The result is floored to four decimal places, not rounded. Later steps
/// compare against values produced this way, so the truncation is part of
/// the formula.
pub fn ral_to_degree(rasi: i32, angsa: i32, lipda: i32) -> f64 {
  let units = f64::from(30 * rasi + angsa) * 10000.0;
  let minutes = f64::from(lipda * 10000) / 60.0;
  (units + minutes).floor() / 10000.0
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize(degree: f64) -> f64 {
  let wrapped = degree.rem_euclid(360.0);
  // rem_euclid can round tiny negatives up to exactly 360
  if wrapped >= 360.0 { 0.0 } else { wrapped }
}
