//! Configuration for the nxshot binary.
//!
//! Settings are read from CLI arguments and the user config file
//! (`~/.config/nxshot.toml`). CLI arguments take priority.
//!
//! # Example config file section
//!
//! ```toml
//! [nxshot]
//! catalog = "/home/user/switch/gameids.json"
//! debug = false
//! dryrun = false
//! skip_existing = false
//! verbose = true
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use serde::Deserialize;

use crate::Args;

/// User configuration from the config file.
///
/// These settings can be overridden by CLI arguments.
#[derive(Debug, Default, Deserialize)]
struct NxshotConfig {
    /// Path to a JSON file with extra game id to name entries.
    #[serde(default)]
    catalog: Option<PathBuf>,

    /// Print debug information.
    #[serde(default)]
    debug: bool,

    /// Only print what would be organized without copying.
    #[serde(default)]
    dryrun: bool,

    /// Skip captures that already exist in the output directory.
    #[serde(default)]
    skip_existing: bool,

    /// Print verbose output.
    #[serde(default)]
    verbose: bool,
}

/// Wrapper struct for parsing the `[nxshot]` section from the config file.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    nxshot: NxshotConfig,
}

/// Final configuration combined from CLI arguments and user config file.
#[derive(Debug)]
pub struct Config {
    /// Path to a JSON file with extra game id to name entries.
    pub catalog: Option<PathBuf>,

    /// Print debug information.
    pub debug: bool,

    /// Only print what would be organized without copying.
    pub dryrun: bool,

    /// Input directory to scan for capture files.
    pub path: PathBuf,

    /// Skip captures that already exist in the output directory.
    pub skip_existing: bool,

    /// Print verbose output.
    pub verbose: bool,
}

impl NxshotConfig {
    /// Read user configuration from the config file.
    ///
    /// Attempts to read from `~/.config/nxshot.toml`. If the file doesn't exist,
    /// returns default configuration.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    fn get_user_config() -> Result<Self> {
        let Some(path) = nxshot::config::CONFIG_PATH.as_deref() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow!("Failed to read config file {}: {error}", path.display())),
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.nxshot)
            .map_err(|e| anyhow!("Failed to parse config: {e}"))
    }
}

impl Config {
    /// Create configuration from CLI arguments and user config file.
    ///
    /// CLI arguments take priority over config file settings.
    /// Boolean flags are combined with OR (enabled if either source enables them).
    ///
    /// # Errors
    /// Returns an error if the input path cannot be resolved or the config file
    /// cannot be read or parsed.
    pub fn try_from_args(args: &Args) -> Result<Self> {
        let user_config = NxshotConfig::get_user_config()?;
        let path = nxshot::resolve_input_path(args.path.as_deref())?;

        Ok(Self {
            catalog: args.catalog.clone().or(user_config.catalog),
            debug: args.debug || user_config.debug,
            dryrun: args.print || user_config.dryrun,
            path,
            skip_existing: args.skip_existing || user_config.skip_existing,
            verbose: args.verbose || user_config.verbose,
        })
    }
}
