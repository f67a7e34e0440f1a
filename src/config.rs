//! Service configuration and seed data.
//!
//! Configuration is a small TOML file whose path is taken from
//! `RESTAURANT_CONFIG`; every key has a default, so running without a file is
//! fine. The optional seed file is JSON shaped as
//! `{ "dishes": [...], "orders": [...] }`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::{Dish, Order};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "RESTAURANT_CONFIG";

/// Errors that can occur while loading configuration or seed data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // Keep the message, drop the echoed input
        ConfigError::Parse(err.message().to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Mailbox size of each resource actor.
    pub channel_buffer: usize,
    /// Default `tracing` filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
    /// JSON file with records to load before the actors start.
    pub seed_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            log_filter: "info".to_string(),
            seed_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: AppConfig = content.parse()?;

        // Seed paths are relative to the config file
        if let Some(seed) = config.seed_file.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.seed_file = Some(if seed.is_relative() { base.join(seed) } else { seed });
        }
        Ok(config)
    }

    /// Loads the file named by [`CONFIG_ENV`], or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Reads the seed file, or returns empty seed data when none is configured.
    pub fn load_seed(&self) -> Result<SeedData, ConfigError> {
        match &self.seed_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let seed: SeedData = serde_json::from_str(&content)?;
                seed.validate()?;
                Ok(seed)
            }
            None => Ok(SeedData::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::Validation(
                "channel_buffer must be greater than 0".into(),
            ));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Validation("log_filter cannot be empty".into()));
        }
        Ok(())
    }
}

impl FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

/// Records loaded into the stores at startup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedData {
    pub dishes: Vec<Dish>,
    pub orders: Vec<Order>,
}

impl SeedData {
    /// Seed records must satisfy the same invariants as created ones.
    fn validate(&self) -> Result<(), ConfigError> {
        for dish in &self.dishes {
            if dish.id.is_empty() || dish.price <= 0 {
                return Err(ConfigError::Validation(format!(
                    "Seed dish '{}' needs an id and a price greater than 0",
                    dish.id
                )));
            }
        }
        for order in &self.orders {
            if order.id.is_empty() || order.dishes.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Seed order '{}' needs an id and at least one dish",
                    order.id
                )));
            }
            if let Some(item) = order.dishes.iter().find(|item| item.quantity < 1) {
                return Err(ConfigError::Validation(format!(
                    "Seed order '{}' has dish {} with a quantity below 1",
                    order.id,
                    item.dish_id.as_deref().unwrap_or("without dishId")
                )));
            }
        }
        Ok(())
    }
}
