//! Game configuration, read from a RON file.
//!
//! Every field has a default, so an empty `()` file (or no file at all) gives
//! the stock 160×120 game at 30 fps.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::error::{GameError, Result};

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "top_down_shooter.ron";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width in pixels (= terminal columns).
    pub width: u32,
    /// Height in pixels (= twice the terminal rows).
    pub height: u32,
    pub fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 120,
            fps: 30,
        }
    }
}

impl DisplayConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    /// External sprite sheet; the bundled one is used when unset.
    pub sheet: Option<PathBuf>,
    /// Seed for every random choice in a session.  Fresh entropy when unset.
    pub seed: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            sheet: None,
            seed: None,
            log_file: PathBuf::from("top_down_shooter.log"),
        }
    }
}

impl Config {
    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        ron::from_str(source).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source, path)
    }

    /// Load `explicit` if given, else the default file if it exists, else
    /// built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            info!("using config {}", fallback.display());
            Self::from_file(fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject sizes the game cannot be played at.
    pub fn validate(&self) -> Result<()> {
        let d = &self.display;
        if d.width < 8 || d.height < 8 {
            return Err(GameError::InvalidDisplay(format!(
                "display must be at least 8x8, got {}x{}",
                d.width, d.height
            )));
        }
        // One terminal row holds two pixel rows; an odd height still needs the
        // last half-filled row.
        if d.width > u16::MAX as u32 || d.height.div_ceil(2) > u16::MAX as u32 {
            return Err(GameError::InvalidDisplay(format!(
                "display {}x{} does not fit a terminal",
                d.width, d.height
            )));
        }
        if d.fps == 0 {
            return Err(GameError::InvalidDisplay("fps must be at least 1".into()));
        }
        Ok(())
    }
}
