use std::{
  fs, io,
  path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate};
use suriya_core::feed::{AerisResponse, AstroMoon, MoonPhaseFeed};
use tracing::{debug, warn};

use crate::{Error, Result};

/// A [`MoonPhaseFeed`] over a directory of `astro-YYYY.json` files.
///
/// Years are read in order from the first year of the requested range. The
/// first missing file ends the scan. Files that report an unsuccessful
/// download or do not parse are skipped.
#[derive(Debug, Clone)]
pub struct AstroDirFeed {
  dir: PathBuf,
}

impl AstroDirFeed {
  /// Open a feed over `dir`. The directory must exist.
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    if !dir.is_dir() {
      return Err(Error::NotADirectory(dir));
    }
    Ok(Self { dir })
  }

  pub fn dir(&self) -> &Path { &self.dir }

  /// Path of the file holding `year`.
  pub fn path_for(&self, year: i32) -> PathBuf {
    self.dir.join(format!("astro-{year}.json"))
  }

  /// The data set for `year`, or `None` if there is no file for it.
  pub fn read_year(&self, year: i32) -> Result<Option<AerisResponse>> {
    let path = self.path_for(year);
    let text = match fs::read_to_string(&path) {
      Ok(text) => text,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(source) => return Err(Error::Io { path, source }),
    };
    serde_json::from_str(&text)
      .map(Some)
      .map_err(|source| Error::Json { path, source })
  }
}

impl MoonPhaseFeed for AstroDirFeed {
  type Error = Error;

  fn moon_phases(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<AstroMoon>> {
    let mut moons = Vec::new();

    for year in from.year()..=to.year() {
      let response = match self.read_year(year) {
        Ok(Some(response)) => response,
        Ok(None) => {
          debug!(year, dir = %self.dir.display(), "no moon phase data, stopping");
          break;
        }
        Err(e @ Error::Json { .. }) => {
          warn!(year, error = %e, "skipping malformed moon phase data");
          continue;
        }
        Err(e) => return Err(e),
      };

      if !response.is_usable() {
        let reason = response
          .error
          .as_ref()
          .map(|e| format!("{}: {}", e.code, e.description))
          .unwrap_or_else(|| "unsuccessful".to_string());
        warn!(year, %reason, "skipping moon phase data");
        continue;
      }

      moons.extend(response.moons(from, to));
    }

    Ok(moons)
  }
}
