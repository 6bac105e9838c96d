//! Main application configuration
//!
//! Defines the configuration for the scoring service, loaded from a TOML
//! file or from environment variables, with validation.

use crate::config::scoring::{parse_points_table, ScoringSettings};
use crate::store::RetryPolicy;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub store: StoreSettings,
    pub scoring: ScoringSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Settings for talking to the result store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Attempts for a read before giving up
    pub max_retry_attempts: u32,
    /// Delay before the first retry in milliseconds, doubled each time
    pub retry_delay_ms: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "gala-scoreboard".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            max_retry_attempts: 3,
            retry_delay_ms: 500,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Store settings
        if let Ok(retries) = env::var("STORE_MAX_RETRY_ATTEMPTS") {
            config.store.max_retry_attempts = retries
                .parse()
                .map_err(|_| anyhow!("Invalid STORE_MAX_RETRY_ATTEMPTS value: {}", retries))?;
        }
        if let Ok(delay) = env::var("STORE_RETRY_DELAY_MS") {
            config.store.retry_delay_ms = delay
                .parse()
                .map_err(|_| anyhow!("Invalid STORE_RETRY_DELAY_MS value: {}", delay))?;
        }

        // Scoring settings
        if let Ok(table) = env::var("POINTS_TABLE") {
            config.scoring.points_table = parse_points_table(&table)
                .with_context(|| format!("Invalid POINTS_TABLE value: {}", table))?;
        }
        if let Ok(limit) = env::var("TOP_PERFORMERS_LIMIT") {
            config.scoring.top_performers_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid TOP_PERFORMERS_LIMIT value: {}", limit))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Get the first retry delay as Duration
    pub fn store_retry_delay(&self) -> Duration {
        Duration::from_millis(self.store.retry_delay_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.store.max_retry_attempts, self.store_retry_delay())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    if config.store.max_retry_attempts == 0 {
        return Err(anyhow!("Store retry attempts must be at least 1"));
    }

    config.scoring.points_table.validate()?;

    if config.scoring.top_performers_limit == 0 {
        return Err(anyhow!("Top performers limit must be greater than 0"));
    }

    Ok(())
}
