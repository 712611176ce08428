//! TOML-based application configuration.
//!
//! Stores app-level settings that are not part of the on-device record
//! store:
//! - Reference time zone offset for day-key normalization
//! - Streak computation bounds
//! - Prompt-generation endpoint and sampling parameters
//!
//! The per-user toggles (push notifications, dark mode, reminder time)
//! live in the record store's key-value namespace instead, alongside the
//! journal data they belong to.
//!
//! Configuration is stored at `~/.config/dailyq/config.toml`.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::records::{reference_offset, DEFAULT_UTC_OFFSET_HOURS};
use crate::stats::DEFAULT_STREAK_SCAN_DAYS;

/// Reference time zone configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Whole-hour UTC offset all day keys are normalized to.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

/// Statistics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Upper bound on the backward day-walk for the current streak.
    #[serde(default = "default_streak_scan_days")]
    pub streak_scan_days: u32,
}

/// Prompt-provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Chat-completion endpoint. When unset, only the local fallback
    /// list is used.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Environment variable the API key is read from.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Simulated-latency range for the local fallback, milliseconds.
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: (u64, u64),
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dailyq/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
}

// Default functions
fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}
fn default_streak_scan_days() -> u32 {
    DEFAULT_STREAK_SCAN_DAYS
}
fn default_api_key_env() -> String {
    "DAILYQ_API_KEY".into()
}
fn default_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_max_tokens() -> u32 {
    50
}
fn default_temperature() -> f64 {
    0.8
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_fallback_delay_ms() -> (u64, u64) {
    (500, 1500)
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            streak_scan_days: default_streak_scan_days(),
        }
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            fallback_delay_ms: default_fallback_delay_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time: TimeConfig::default(),
            stats: StatsConfig::default(),
            prompts: PromptsConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, std::io::Error> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// The fixed offset every day key is normalized to.
    pub fn offset(&self) -> FixedOffset {
        reference_offset(self.time.utc_offset_hours)
    }

    /// Load from disk, writing the default config on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/dailyq/config.toml"),
            message: e.to_string(),
        })?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("~/.config/dailyq/config.toml"),
            message: e.to_string(),
        })?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = lookup(&json, key)?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// coerced to the field's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        assign(&mut json, key, value)?;
        *self =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        self.save()
    }
}

fn lookup<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    key.split('.').try_fold(root, |node, part| node.get(part))
}

fn assign(root: &mut serde_json::Value, key: &str, raw: &str) -> Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(unknown());
    }

    let mut node = root;
    if let Some(parents) = parents {
        for part in parents.split('.') {
            node = node.get_mut(part).ok_or_else(unknown)?;
        }
    }
    let obj = node.as_object_mut().ok_or_else(unknown)?;
    let slot = obj.get_mut(leaf).ok_or_else(unknown)?;
    *slot = coerce(slot, raw, key)?;
    Ok(())
}

/// Parse `raw` into the same JSON type as the value it replaces.
fn coerce(
    existing: &serde_json::Value,
    raw: &str,
    key: &str,
) -> Result<serde_json::Value, ConfigError> {
    use serde_json::Value;

    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    Ok(match existing {
        Value::Bool(_) => Value::Bool(
            raw.parse()
                .map_err(|_| invalid(format!("expected bool, got '{raw}'")))?,
        ),
        Value::Number(_) => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::Number(n.into())
            } else if let Ok(n) = raw.parse::<f64>() {
                serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or_else(|| invalid(format!("cannot parse '{raw}' as number")))?
            } else {
                return Err(invalid(format!("cannot parse '{raw}' as number")));
            }
        }
        Value::Array(_) | Value::Object(_) => {
            serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?
        }
        // Optional fields currently unset accept JSON or a bare string.
        Value::Null => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
        Value::String(_) => Value::String(raw.to_string()),
    })
}
