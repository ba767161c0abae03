//! TOML-based application configuration.
//!
//! Stores countdown timings, the parsing mode, and the localized form
//! placeholder strings. Stored at `~/.config/nextup/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::agenda::FormText;
use crate::codec::ParseMode;
use crate::error::ConfigError;
use crate::runner::Timings;

/// Countdown timer periods, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

/// Duration parsing behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// When true, malformed duration text is rejected instead of read as
    /// best-effort zeros.
    #[serde(default)]
    pub strict: bool,
}

fn default_tick_ms() -> u64 {
    1000
}
fn default_fade_ms() -> u64 {
    900
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self { strict: false }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/nextup/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub form: FormText,
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("nextup").join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be parsed, or the
    /// default one cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LoadFailed`] on read or parse failure.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SaveFailed`] on serialization or write failure.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SaveFailed`] on serialization or write failure.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| fail(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| fail(e.to_string()))
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as a string by dot-separated key, e.g.
    /// `"countdown.tick_ms"`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for keys not in the schema and
    /// [`ConfigError::InvalidValue`] when the value does not fit the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let (section, field) = key
            .split_once('.')
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let slot = json
            .get_mut(section)
            .and_then(|s| s.get_mut(field))
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        *slot = match slot {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse().map_err(
                |_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected true/false, got {value:?}"),
                },
            )?),
            serde_json::Value::Number(_) => {
                let n: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected integer, got {value:?}"),
                })?;
                serde_json::Value::Number(n.into())
            }
            _ => serde_json::Value::String(value.to_string()),
        };

        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn timings(&self) -> Timings {
        Timings {
            tick: Duration::from_millis(self.countdown.tick_ms),
            fade: Duration::from_millis(self.countdown.fade_ms),
        }
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.parsing.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}
