//! Calendrical arithmetic for the Suriyayart / Chulasakkarat lunisolar
//! calendar.
//!
//! This crate is pure computation: no I/O, no clocks, no global state. The
//! historical moon-phase data set and every export format live in other
//! crates and plug in through [`feed::MoonPhaseFeed`] and
//! [`event::CalendarEvent`].
//!
//! # Quick start
//!
//! ```
//! use suriya_core::{Almanac, generate::generate_solar_year};
//!
//! let almanac = Almanac::default();
//! assert!(almanac.is_adhikamasa(2015));
//!
//! let events = generate_solar_year(&almanac, 2015);
//! assert!(!events.is_empty());
//! ```

pub mod calday;
pub mod day;
pub mod degree;
pub mod error;
pub mod event;
pub mod feed;
pub mod generate;
pub mod leap;
pub mod uposatha;
pub mod year;


pub use error::{Error, Result};
pub use leap::{Almanac, LeapConfig};

/// Absolute difference between the Common Era and the Buddhist Era.
pub const BE_DIFF: i32 = 543;

/// Absolute difference between the Common Era and the Chulasakkarat Era.
pub const CS_DIFF: i32 = 638;
