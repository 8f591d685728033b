//! Runtime configuration for a [`Storefront`](super::Storefront).
//!
//! Defaults suit a demo or a test. A host can deserialize the config from whatever format it
//! already uses, or read it from the environment with [`StorefrontConfig::from_env`].

use serde::Deserialize;
use thiserror::Error;

pub const ENV_CATALOG_BUFFER: &str = "STOREFRONT_CATALOG_BUFFER";
pub const ENV_ORDER_BUFFER: &str = "STOREFRONT_ORDER_BUFFER";
pub const ENV_SESSION_BUFFER: &str = "STOREFRONT_SESSION_BUFFER";
pub const ENV_SEED_CATALOG: &str = "STOREFRONT_SEED_CATALOG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Mailbox capacity of the catalog actor.
    pub catalog_buffer: usize,
    /// Mailbox capacity of the order actor.
    pub order_buffer: usize,
    /// Mailbox capacity of each cart session.
    pub session_buffer: usize,
    /// Load the demo products on start.
    pub seed_catalog: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_buffer: 32,
            order_buffer: 32,
            session_buffer: 16,
            seed_catalog: false,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_buffer(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    let size: usize = value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(key, value, e.to_string()))?;
    if size == 0 {
        return Err(invalid(key, value, "must be at least 1"));
    }
    Ok(size)
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

impl StorefrontConfig {
    /// Defaults overridden by any `STOREFRONT_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_CATALOG_BUFFER) {
            config.catalog_buffer = parse_buffer(ENV_CATALOG_BUFFER, &value)?;
        }
        if let Some(value) = lookup(ENV_ORDER_BUFFER) {
            config.order_buffer = parse_buffer(ENV_ORDER_BUFFER, &value)?;
        }
        if let Some(value) = lookup(ENV_SESSION_BUFFER) {
            config.session_buffer = parse_buffer(ENV_SESSION_BUFFER, &value)?;
        }
        if let Some(value) = lookup(ENV_SEED_CATALOG) {
            config.seed_catalog = parse_flag(ENV_SEED_CATALOG, &value)?;
        }
        Ok(config)
    }

    /// Mailboxes need room for at least one message.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, size) in [
            (ENV_CATALOG_BUFFER, self.catalog_buffer),
            (ENV_ORDER_BUFFER, self.order_buffer),
            (ENV_SESSION_BUFFER, self.session_buffer),
        ] {
            if size == 0 {
                return Err(invalid(key, "0", "must be at least 1"));
            }
        }
        Ok(())
    }
}
