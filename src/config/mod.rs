//! Configuration for the fnkit CLI and demo runner
//!
//! Values are layered, lowest priority first:
//!
//! 1. Hardcoded defaults
//! 2. YAML config file (when a path is given)
//! 3. Environment variables (`FNKIT_*` prefix)
//!
//! ```
//! use fnkit::config::FnkitConfig;
//!
//! let config = FnkitConfig::from_yaml_str("debounce:\n  delay_ms: 150\n").unwrap();
//! assert_eq!(config.debounce.delay_ms, 150);
//! assert_eq!(config.log_level, "info");
//! ```

use crate::error::{ErrorCode, FnkitError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub const ENV_LOG_LEVEL: &str = "FNKIT_LOG_LEVEL";
pub const ENV_DEBOUNCE_MS: &str = "FNKIT_DEBOUNCE_MS";
pub const ENV_FETCH_LATENCY_MS: &str = "FNKIT_FETCH_LATENCY_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnkitConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub debounce: DebounceSettings,

    #[serde(default)]
    pub fetch: FetchSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceSettings {
    /// Idle window before a debounced call fires.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Simulated latency of the demo fetch.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_delay_ms() -> u64 {
    300
}

fn default_latency_ms() -> u64 {
    300
}

impl Default for FnkitConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            debounce: DebounceSettings::default(),
            fetch: FetchSettings::default(),
        }
    }
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

impl DebounceSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl FetchSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl FnkitConfig {
    /// Load from defaults, an optional YAML file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Load with an injected environment lookup
    pub fn load_with(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| FnkitError::config_not_found(path).with_source(e))?;
                Self::from_yaml_str(&contents)?
            }
            None => Self::default(),
        };

        let config = base.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document; missing fields take their defaults
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `FNKIT_*` variables
    pub fn apply_env(mut self, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(level) = env(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(raw) = env(ENV_DEBOUNCE_MS) {
            self.debounce.delay_ms = parse_millis(ENV_DEBOUNCE_MS, &raw)?;
        }
        if let Some(raw) = env(ENV_FETCH_LATENCY_MS) {
            self.fetch.latency_ms = parse_millis(ENV_FETCH_LATENCY_MS, &raw)?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(FnkitError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!(
                    "Invalid log level '{}', expected one of: {}",
                    self.log_level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }
        Ok(())
    }
}

/// Milliseconds must be a non-negative integer
fn parse_millis(field: &str, raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|e| {
        FnkitError::invalid_config_value(field, raw, "expected a non-negative integer")
            .with_source(e)
    })
}
