//! Runtime configuration.
//!
//! Defaults are built in. With the `config` feature a TOML file is merged on top
//! (the `--config` path, or `<config_dir>/wavetui/config.toml` when present), and
//! command-line flags override both.
//!
//! ```toml
//! time_per_char = 1000
//! names_width = 40
//! theme = "high-contrast"
//! ```

use crate::error::{Result, WaveError};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Initial zoom: picoseconds represented by one column.
pub const DEFAULT_TIME_PER_CHAR: u64 = 8000;
/// Width of the signal names pane in columns.
pub const DEFAULT_NAMES_WIDTH: u16 = 30;
/// Width of the values pane in columns.
pub const DEFAULT_VALUES_WIDTH: u16 = 15;

const MIN_PANE_WIDTH: u16 = 4;

/// Built-in color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum ThemeName {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl FromStr for ThemeName {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "monochrome" | "mono" => Ok(Self::Monochrome),
            "high-contrast" | "high_contrast" => Ok(Self::HighContrast),
            other => Err(WaveError::config(format!("unknown theme '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct Config {
    pub time_per_char: u64,
    pub names_width: u16,
    pub values_width: u16,
    pub theme: ThemeName,
    /// Directory the file browser opens in; the working directory when unset.
    pub start_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_per_char: DEFAULT_TIME_PER_CHAR,
            names_width: DEFAULT_NAMES_WIDTH,
            values_width: DEFAULT_VALUES_WIDTH,
            theme: ThemeName::Default,
            start_dir: None,
        }
    }
}

impl Config {
    /// Load the configuration file, if any, and validate it.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|path| path.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "config")]
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| WaveError::file_error(format!("Cannot read {}", path.display()), e))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| WaveError::config(format!("{}: {}", path.display(), e)))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    #[cfg(not(feature = "config"))]
    pub fn from_file(path: &Path) -> Result<Self> {
        Err(WaveError::config(format!(
            "cannot read {}: built without the `config` feature",
            path.display()
        )))
    }

    #[cfg(feature = "config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wavetui").join("config.toml"))
    }

    #[cfg(not(feature = "config"))]
    pub fn default_path() -> Option<PathBuf> {
        None
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, time_per_char: Option<u64>, theme: Option<ThemeName>) -> Self {
        if let Some(time_per_char) = time_per_char {
            self.time_per_char = time_per_char;
        }
        if let Some(theme) = theme {
            self.theme = theme;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_per_char == 0 {
            return Err(WaveError::config("time_per_char must be at least 1"));
        }
        if self.names_width < MIN_PANE_WIDTH || self.values_width < MIN_PANE_WIDTH {
            return Err(WaveError::config(format!(
                "pane widths must be at least {MIN_PANE_WIDTH} columns"
            )));
        }
        if let Some(dir) = &self.start_dir {
            if !dir.is_dir() {
                return Err(WaveError::config(format!(
                    "start_dir is not a directory: {}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
