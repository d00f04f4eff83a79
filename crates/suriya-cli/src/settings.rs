//! Settings shared by all subcommands.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use suriya_core::LeapConfig;

/// Config file read when `--config` is not given. It may be absent.
pub const DEFAULT_CONFIG_FILE: &str = "suriya.toml";

/// Runtime configuration, deserialised from the config file and `SURIYA_*`
/// environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
  #[serde(default = "default_use_exceptions")]
  pub use_exceptions: bool,
  /// Directory of `astro-YYYY.json` files.
  #[serde(default)]
  pub astro_dir:      Option<PathBuf>,
  /// Name of the exported iCalendar.
  #[serde(default)]
  pub calendar_name:  Option<String>,
}

fn default_use_exceptions() -> bool { true }

impl Default for CliConfig {
  fn default() -> Self {
    Self {
      use_exceptions: default_use_exceptions(),
      astro_dir:      None,
      calendar_name:  None,
    }
  }
}

impl CliConfig {
  /// Layer the config file under the environment. An explicit `path` must
  /// exist; the default file is optional.
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    let file = match path {
      Some(path) => config::File::from(path).required(true),
      None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let settings = config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix("SURIYA").try_parsing(true))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")
  }

  pub fn leap_config(&self) -> LeapConfig {
    LeapConfig {
      use_exceptions: self.use_exceptions,
    }
  }
}
