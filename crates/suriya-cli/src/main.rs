//! `suriya`: uposatha moondays on the command line.
//!
//! # Usage
//!
//! ```text
//! suriya caldays --from 2015-01-01 --to 2016-12-31 --output caldays.json
//! suriya ical --output mahanikaya.ical
//! suriya years --first 1984 --last 2040
//! suriya day 1963 103
//! ```

mod commands;
mod settings;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use suriya_core::{
  Almanac,
  day::DayState,
  generate::{MAX_YEAR, MIN_YEAR},
  leap::COMMON_YEAR_DAYS,
};
use suriya_ical::CalendarMeta;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::CliConfig;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "suriya", version, about = "Uposatha moondays on the command line")]
struct Cli {
  /// Path to a TOML config file (use_exceptions, astro_dir, calendar_name).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Use the formula calendar without the historical adhikavāra exceptions.
  #[arg(long, global = true)]
  no_exceptions: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Calendar days as JSON, grouped by year.
  Caldays(RangeArgs),

  /// Calendar days as an iCalendar feed.
  Ical {
    #[command(flatten)]
    range: RangeArgs,

    /// Calendar name (default: "Uposatha Moondays (Mahānikāya)").
    #[arg(long, env = "SURIYA_CALENDAR_NAME")]
    name: Option<String>,
  },

  /// Year values and intercalations as CSV.
  Years {
    /// First CE year, defaults to this year.
    #[arg(long, value_parser = year_parser())]
    first: Option<i32>,

    /// Last CE year, defaults to one 19 year cycle after the first.
    #[arg(long, value_parser = year_parser())]
    last: Option<i32>,

    /// Output file name.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
  },

  /// Sun and Moon positions on the nth day of a lunar year.
  Day {
    /// CE year.
    #[arg(value_parser = year_parser())]
    year: i32,

    /// Day of the lunar year.
    #[arg(value_parser = clap::value_parser!(i64).range(0..=COMMON_YEAR_DAYS + 30))]
    day: i64,
  },
}

#[derive(Args, Debug)]
struct RangeArgs {
  /// From date as YYYY-MM-DD, defaults to Jan 1st of this year.
  #[arg(long, value_name = "YYYY-MM-DD")]
  from: Option<NaiveDate>,

  /// To date as YYYY-MM-DD, defaults to Dec 31 of this year.
  #[arg(long, value_name = "YYYY-MM-DD")]
  to: Option<NaiveDate>,

  /// Output file name.
  #[arg(short, long, value_name = "FILE")]
  output: Option<PathBuf>,
}

fn year_parser() -> clap::builder::RangedI64ValueParser<i32> {
  clap::value_parser!(i32).range(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR))
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Logs go to stderr, stdout carries the output.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = CliConfig::load(cli.config.as_deref())?;
  if cli.no_exceptions {
    cfg.use_exceptions = false;
  }
  let almanac = Almanac::new(cfg.leap_config());
  let this_year = Utc::now().year();

  match cli.command {
    Command::Caldays(range) => {
      let (from, to) = commands::date_range(range.from, range.to, this_year)?;
      let days = commands::load_days(&almanac, &cfg, from, to)?;
      let json = commands::caldays_json(&days).context("failed to encode calendar days")?;
      write_output(range.output, &format!("{json}\n"))
    }

    Command::Ical { range, name } => {
      let (from, to) = commands::date_range(range.from, range.to, this_year)?;
      let days = commands::load_days(&almanac, &cfg, from, to)?;
      let meta = match name.or(cfg.calendar_name) {
        Some(name) => CalendarMeta::default().with_name(name),
        None => CalendarMeta::default(),
      };
      write_output(range.output, &suriya_ical::serialize(&days, &meta))
    }

    Command::Years {
      first,
      last,
      output,
    } => {
      let first = first.unwrap_or(this_year);
      let last = last.unwrap_or((first + 19).min(MAX_YEAR));
      write_output(output, &commands::years_csv(&almanac, first, last))
    }

    Command::Day { year, day } => {
      print!("{}", almanac.year(year));
      print!("{}", commands::day_report(&DayState::new(year, day)));
      Ok(())
    }
  }
}

/// Write to `output` if given, else to stdout.
fn write_output(output: Option<PathBuf>, text: &str) -> Result<()> {
  match output {
    Some(path) => {
      fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
      tracing::info!("wrote {}", path.display());
      Ok(())
    }
    None => {
      print!("{text}");
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn cli_definition_is_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn day_arguments_are_bounded() {
    assert!(Cli::try_parse_from(["suriya", "day", "1963", "103"]).is_ok());
    assert!(Cli::try_parse_from(["suriya", "day", "1963", "0"]).is_ok());
    assert!(Cli::try_parse_from(["suriya", "day", "2147483637", "103"]).is_err());
    assert!(Cli::try_parse_from(["suriya", "day", "1963", "4611686018427387903"]).is_err());
    assert!(Cli::try_parse_from(["suriya", "day", "1963", "385"]).is_err());
    assert!(Cli::try_parse_from(["suriya", "day", "1963", "-1"]).is_err());
  }

  #[test]
  fn year_table_arguments_are_bounded() {
    assert!(Cli::try_parse_from(["suriya", "years", "--first", "1984", "--last", "2040"]).is_ok());
    assert!(Cli::try_parse_from(["suriya", "years", "--first", "262200"]).is_err());
    assert!(Cli::try_parse_from(["suriya", "years", "--last", "-262200"]).is_err());
  }
}
