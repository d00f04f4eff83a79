//! Tests for `AstroDirFeed` against a temporary directory.

use std::fs;

use chrono::NaiveDate;
use suriya_core::{feed::MoonPhaseFeed, uposatha::Phase};
use tempfile::TempDir;

use crate::{AstroDirFeed, Error};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

const YEAR_2015: &str = r#"{
  "success": true,
  "error": null,
  "response": [
    {"timestamp": 1420426380, "dateTimeISO": "2015-01-05T11:53:00+07:00", "code": 2, "name": "full moon"},
    {"timestamp": 1421075220, "dateTimeISO": "2015-01-13T16:46:00+07:00", "code": 3, "name": "third quarter"},
    {"timestamp": 1421719080, "dateTimeISO": "2015-01-20T20:13:00+07:00", "code": 0, "name": "new moon"},
    {"timestamp": 1438254000, "dateTimeISO": "2015-07-31T17:43:00+07:00", "code": 2, "name": "full moon"}
  ]
}"#;

const YEAR_2016: &str = r#"{
  "success": true,
  "response": [
    {"timestamp": 1452476400, "dateTimeISO": "2016-01-10T08:30:00+07:00", "code": 0, "name": "new moon"}
  ]
}"#;

const FAILED: &str = r#"{
  "success": false,
  "error": {"code": "maxhits_daily", "description": "Daily limit reached"},
  "response": []
}"#;

fn dir_with(files: &[(i32, &str)]) -> TempDir {
  let dir = tempfile::tempdir().expect("temp dir");
  for (year, body) in files {
    fs::write(dir.path().join(format!("astro-{year}.json")), body).expect("write year file");
  }
  dir
}

// ─── Reading ─────────────────────────────────────────────────────────────────

#[test]
fn reads_new_and_full_moons_in_range() {
  let dir = dir_with(&[(2015, YEAR_2015)]);
  let feed = AstroDirFeed::open(dir.path()).unwrap();

  let moons = feed.moon_phases(ymd(2015, 1, 1), ymd(2015, 12, 31)).unwrap();
  let dates: Vec<_> = moons.iter().map(|m| (m.date, m.phase)).collect();
  assert_eq!(
    dates,
    vec![
      (ymd(2015, 1, 5), Phase::Full),
      (ymd(2015, 1, 20), Phase::New),
      (ymd(2015, 7, 31), Phase::Full),
    ]
  );
}

#[test]
fn filters_to_the_requested_days() {
  let dir = dir_with(&[(2015, YEAR_2015)]);
  let feed = AstroDirFeed::open(dir.path()).unwrap();

  let moons = feed.moon_phases(ymd(2015, 7, 1), ymd(2015, 7, 31)).unwrap();
  assert_eq!(moons.len(), 1);
  assert_eq!(moons[0].date, ymd(2015, 7, 31));
}

#[test]
fn spans_several_files() {
  let dir = dir_with(&[(2015, YEAR_2015), (2016, YEAR_2016)]);
  let feed = AstroDirFeed::open(dir.path()).unwrap();

  let moons = feed.moon_phases(ymd(2015, 7, 1), ymd(2016, 6, 30)).unwrap();
  assert_eq!(moons.len(), 2);
  assert_eq!(moons[1].date, ymd(2016, 1, 10));
}

// ─── Gaps and failures ───────────────────────────────────────────────────────

#[test]
fn missing_year_ends_the_scan() {
  let dir = dir_with(&[(2015, YEAR_2015), (2017, YEAR_2016)]);
  let feed = AstroDirFeed::open(dir.path()).unwrap();

  let moons = feed.moon_phases(ymd(2015, 1, 1), ymd(2017, 12, 31)).unwrap();
  assert_eq!(moons.len(), 3);
  assert!(feed.read_year(2016).unwrap().is_none());
}

#[test]
fn unsuccessful_files_are_skipped() {
  let dir = dir_with(&[(2015, FAILED), (2016, YEAR_2016)]);
  let feed = AstroDirFeed::open(dir.path()).unwrap();

  let moons = feed.moon_phases(ymd(2015, 1, 1), ymd(2016, 12, 31)).unwrap();
  assert_eq!(moons.len(), 1);
  assert_eq!(moons[0].phase, Phase::New);
}

#[test]
fn malformed_year_is_an_error_when_read_alone() {
  let dir = dir_with(&[(2015, "{ not json")]);
  let feed = AstroDirFeed::open(dir.path()).unwrap();

  let err = feed.read_year(2015).unwrap_err();
  assert!(matches!(err, Error::Json { .. }));
  assert!(err.to_string().contains("astro-2015.json"));
}

#[test]
fn malformed_years_are_skipped() {
  let dir = dir_with(&[(2015, "{ not json"), (2016, YEAR_2016)]);
  let feed = AstroDirFeed::open(dir.path()).unwrap();

  let moons = feed.moon_phases(ymd(2015, 1, 1), ymd(2016, 12, 31)).unwrap();
  assert_eq!(moons.len(), 1);
  assert_eq!(moons[0].date, ymd(2016, 1, 10));
}

#[test]
fn open_requires_a_directory() {
  let dir = tempfile::tempdir().unwrap();
  let missing = dir.path().join("nope");
  assert!(matches!(AstroDirFeed::open(&missing), Err(Error::NotADirectory(_))));
}

#[test]
fn empty_directory_has_no_moons() {
  let dir = tempfile::tempdir().unwrap();
  let feed = AstroDirFeed::open(dir.path()).unwrap();
  assert!(feed.moon_phases(ymd(2015, 1, 1), ymd(2015, 12, 31)).unwrap().is_empty());
  assert_eq!(feed.path_for(2015), dir.path().join("astro-2015.json"));
}
