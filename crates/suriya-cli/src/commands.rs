//! Output of each subcommand, rendered to a string.

use std::collections::BTreeMap;

use anyhow::{Context as _, bail};
use chrono::{Datelike, NaiveDate};
use suriya_astro::AstroDirFeed;
use suriya_core::{
  Almanac,
  calday::{CalDay, cal_days},
  day::DayState,
  degree::to_ral,
  feed::NoFeed,
  generate::asalha_puja,
  leap::{adhikamasa_cycle_pos, adhikavara_cycle_pos},
};
use tracing::info;

use crate::settings::CliConfig;

// ─── Date range ──────────────────────────────────────────────────────────────

/// Resolve `--from` / `--to`, defaulting to the whole of `this_year`.
pub fn date_range(
  from: Option<NaiveDate>,
  to: Option<NaiveDate>,
  this_year: i32,
) -> anyhow::Result<(NaiveDate, NaiveDate)> {
  let from = match from {
    Some(d) => d,
    None => NaiveDate::from_ymd_opt(this_year, 1, 1).context("no January 1st in that year")?,
  };
  let to = match to {
    Some(d) => d,
    None => NaiveDate::from_ymd_opt(this_year, 12, 31).context("no December 31st in that year")?,
  };
  if from > to {
    bail!("--from {from} is after --to {to}");
  }
  Ok((from, to))
}

// ─── Calendar days ───────────────────────────────────────────────────────────

/// Calendar days in range, with the astro moons of the configured directory.
pub fn load_days(
  almanac: &Almanac,
  cfg: &CliConfig,
  from: NaiveDate,
  to: NaiveDate,
) -> anyhow::Result<Vec<CalDay>> {
  let days = match &cfg.astro_dir {
    Some(dir) => {
      let feed = AstroDirFeed::open(dir)
        .with_context(|| format!("failed to open astro directory {}", dir.display()))?;
      cal_days(almanac, from, to, &feed)
    }
    None => cal_days(almanac, from, to, &NoFeed),
  };
  info!(%from, %to, days = days.len(), "calendar days ready");
  Ok(days)
}

/// Days as JSON, keyed by calendar year.
pub fn caldays_json(days: &[CalDay]) -> serde_json::Result<String> {
  let mut by_year: BTreeMap<i32, Vec<&CalDay>> = BTreeMap::new();
  for day in days {
    by_year.entry(day.date.year()).or_default().push(day);
  }
  serde_json::to_string(&by_year)
}

// ─── Year table ──────────────────────────────────────────────────────────────

pub const YEARS_CSV_HEADER: &str = "CE year,BE year,kind,nM,dM,nV,dV,K,A,T,Asalha";

/// One row per year from `first` to `last`: intercalation, cycle positions,
/// year values and the Āsāḷha Pūjā date.
///
/// nM / nV are positions in the 19 and 57 year cycles, dM / dV the years
/// since the previous extra month or day, given in leap years only.
pub fn years_csv(almanac: &Almanac, first: i32, last: i32) -> String {
  let mut out = String::from(YEARS_CSV_HEADER);
  out.push('\n');

  for year in first..=last {
    let su = almanac.year(year);
    let kind = almanac.year_kind(year);

    let delta_m = almanac
      .is_adhikamasa(year)
      .then(|| almanac.delta_adhikamasa(year))
      .flatten()
      .map(|d| d.to_string())
      .unwrap_or_default();
    let delta_v = almanac
      .is_adhikavara(year)
      .then(|| almanac.delta_adhikavara(year))
      .flatten()
      .map(|d| d.to_string())
      .unwrap_or_default();
    let asalha = asalha_puja(almanac, year)
      .map(|d| d.to_string())
      .unwrap_or_default();

    out.push_str(&format!(
      "{},{},{},{},{},{},{},{},{},{},{}\n",
      su.year,
      su.be_year,
      kind.mark(),
      adhikamasa_cycle_pos(year),
      delta_m,
      adhikavara_cycle_pos(year),
      delta_v,
      su.kammacubala,
      su.avoman,
      su.tithi,
      asalha,
    ));
  }

  out
}

// ─── Day report ──────────────────────────────────────────────────────────────

pub fn day_report(day: &DayState) -> String {
  let mut out = String::new();
  out.push_str(&format!("CE: {}  CS: {}  day: {}\n", day.year, day.cs_year, day.day));
  out.push_str(&format!("Horakhun: {}\n", day.horakhun));
  out.push_str(&format!("Kammacubala: {}\n", day.kammacubala));
  out.push_str(&format!("Uccabala: {}\n", day.uccabala));
  out.push_str(&format!("Avoman: {}\n", day.avoman));
  out.push_str(&format!("Masaken: {}\n", day.masaken));
  out.push_str(&format!("Tithi: {}\n", day.tithi));
  for (label, degree) in [
    ("Mean Sun", day.mean_sun),
    ("True Sun", day.true_sun),
    ("Mean Moon", day.mean_moon),
    ("True Moon", day.true_moon),
  ] {
    out.push_str(&format!("{label}: {degree:.4} ({})\n", to_ral(degree)));
  }
  out.push_str(&format!(
    "Raek: {:.4} ({}), mansion {}\n",
    day.raek,
    to_ral(day.raek),
    day.mansion()
  ));
  out
}
