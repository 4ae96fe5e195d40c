//! TOML-based configuration.
//!
//! Stores the tunables of the ordering engine:
//! - Effort thresholds for the title-length estimator
//! - Ordering strategy and the date rule used by filters
//! - Reassessment prompt threshold
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::effort::TitleLengthEstimator;
use crate::error::ConfigError;
use crate::filter::DateRule;
use crate::ordering::{OrderingEngine, OrderingStrategy};
use crate::visibility::DEFAULT_IMPORTANT_THRESHOLD;

/// Title-length effort thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffortConfig {
    #[serde(default = "default_easy_max_chars")]
    pub easy_max_chars: usize,
    #[serde(default = "default_medium_max_chars")]
    pub medium_max_chars: usize,
}

/// Ordering algorithm selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderingConfig {
    #[serde(default)]
    pub strategy: OrderingStrategy,
    #[serde(default)]
    pub date_rule: DateRule,
}

/// Emotion reassessment prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassessConfig {
    #[serde(default = "default_important_threshold")]
    pub important_threshold: usize,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub effort: EffortConfig,
    #[serde(default)]
    pub ordering: OrderingConfig,
    #[serde(default)]
    pub reassess: ReassessConfig,
}

fn default_easy_max_chars() -> usize {
    TitleLengthEstimator::DEFAULT_EASY_MAX
}
fn default_medium_max_chars() -> usize {
    TitleLengthEstimator::DEFAULT_MEDIUM_MAX
}
fn default_important_threshold() -> usize {
    DEFAULT_IMPORTANT_THRESHOLD
}

impl Default for EffortConfig {
    fn default() -> Self {
        Self {
            easy_max_chars: default_easy_max_chars(),
            medium_max_chars: default_medium_max_chars(),
        }
    }
}

impl Default for ReassessConfig {
    fn default() -> Self {
        Self {
            important_threshold: default_important_threshold(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot assign to a section".to_string()))
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Location of the config file in the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value has the wrong type,
    /// or the resulting configuration is inconsistent.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Update a value and persist the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.update(key, value)?;
        self.save()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.effort.easy_max_chars > self.effort.medium_max_chars {
            return Err(ConfigError::InvalidValue {
                key: "effort.easy_max_chars".to_string(),
                message: format!(
                    "must not exceed effort.medium_max_chars ({})",
                    self.effort.medium_max_chars
                ),
            });
        }
        Ok(())
    }

    pub fn estimator(&self) -> TitleLengthEstimator {
        TitleLengthEstimator::new(self.effort.easy_max_chars, self.effort.medium_max_chars)
    }

    /// Ordering engine configured from this file.
    pub fn engine(&self) -> OrderingEngine {
        OrderingEngine::new()
            .with_estimator(self.estimator())
            .with_strategy(self.ordering.strategy)
            .with_date_rule(self.ordering.date_rule)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
