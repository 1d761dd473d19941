//! Run configuration: what to fetch, how big to make it and where to put it.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, Environment, File};
use serde::Deserialize;
use strum::{IntoStaticStr, VariantArray};
use url::Url;

use crate::error::{ErrorKind, ResizeError};
use crate::ro_try;

pub const DEFAULT_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/4/41/Sunflower_from_Silesia2.jpg";
pub const DEFAULT_WIDTH: u32 = 250;
pub const DEFAULT_HEIGHT: u32 = 250;

/// Name of the optional config file looked up in the working directory, without extension
pub const CONFIG_FILE: &str = "resize-once";
/// Prefix of the environment variables that override settings, e.g. `RESIZE_ONCE_WIDTH`
pub const ENV_PREFIX: &str = "RESIZE_ONCE";

/// Everything a single run needs. Passed into [crate::pipeline::run].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Image to fetch
    pub url: String,
    /// Target box width; 0 keeps the source width
    pub width: u32,
    /// Target box height; 0 keeps the source height
    pub height: u32,
    /// Ignore the aspect ratio and force the exact box
    pub stretch: bool,
    /// Directory the output file is created in
    pub output_dir: PathBuf,
    /// HTTP timeout. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_owned(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            stretch: false,
            output_dir: PathBuf::from("."),
            timeout_secs: None,
        }
    }
}

impl ResizeConfig {
    /// Loads the configuration: built-in defaults, then an optional `resize-once.toml`,
    /// then `RESIZE_ONCE_*` environment variables.
    pub fn load() -> Result<Self, ResizeError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Same as [Self::load] with another config file.
    /// The path has no extension, any format the `config` crate knows is picked up (`.toml`, `.json`, ...).
    pub fn load_from(config_file: &Path) -> Result<Self, ResizeError> {
        let defaults = Self::default();
        let builder = ro_try!(
            ErrorKind::Config,
            Config::builder()
                .set_default("url", defaults.url)
                .and_then(|b| b.set_default("width", i64::from(defaults.width)))
                .and_then(|b| b.set_default("height", i64::from(defaults.height)))
                .and_then(|b| b.set_default("stretch", defaults.stretch))
                .and_then(|b| {
                    b.set_default("output_dir", defaults.output_dir.to_string_lossy().as_ref())
                })
        )
        .add_source(File::with_name(&config_file.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config = ro_try!(ErrorKind::Config, builder.build());
        Ok(ro_try!(ErrorKind::Config, config.try_deserialize()))
    }

    /// Validates and parses [Self::url]
    pub fn parsed_url(&self) -> Result<Url, ResizeError> {
        Url::parse(&self.url).map_err(|e| {
            crate::ro_err!(ErrorKind::Config, "invalid url `{}': {e}", self.url)
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// The settings that can be overridden, listed by `--help`
#[derive(IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Setting {
    Url,
    Width,
    Height,
    Stretch,
    OutputDir,
    TimeoutSecs,
}

impl Setting {
    pub fn env_var(&self) -> String {
        let name: &'static str = self.into();
        format!("{ENV_PREFIX}_{}", name.to_ascii_uppercase())
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            Setting::Url => "URL of the image to fetch",
            Setting::Width => "width of the target box, 0 keeps the source width",
            Setting::Height => "height of the target box, 0 keeps the source height",
            Setting::Stretch => "ignore the aspect ratio and fill the box exactly",
            Setting::OutputDir => "directory to write the resized image to",
            Setting::TimeoutSecs => "HTTP timeout in seconds (default: none)",
        }
    }
}
