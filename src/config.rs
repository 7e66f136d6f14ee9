//! Forwarder configuration module
//!
//! Startup settings are layered by the `config` crate: built-in defaults,
//! then process environment (after an optional `.env` via dotenvy).
//!
//! `EVENT_BUS_ARN` is NOT captured here. It is looked up on every invocation
//! so a changed value takes effect without a cold start.

use crate::error::ForwarderError;
use config::{Config, Environment};
use serde::Deserialize;
use std::env;

/// Environment variable naming the destination event bus
pub const EVENT_BUS_ENV: &str = "EVENT_BUS_ARN";

/// Retry ceiling for throttling-class failures on the publishing client
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 50;

/// Forwarder configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ForwarderConfig {
    /// Log level for this crate (trace, debug, info, warn, error)
    pub log_level: String,

    /// Max attempts for the adaptive retry strategy, including the first call
    pub retry_max_attempts: u32,
}

impl ForwarderConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ForwarderError> {
        dotenvy::dotenv().ok();
        Self::from_environment(Environment::default())
    }

    fn from_environment(source: Environment) -> Result<Self, ForwarderError> {
        let config: Self = Config::builder()
            .set_default("log_level", "info")
            .and_then(|b| b.set_default("retry_max_attempts", i64::from(DEFAULT_RETRY_MAX_ATTEMPTS)))
            .map_err(|e| ForwarderError::Config(e.to_string()))?
            .add_source(source.try_parsing(true))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| ForwarderError::Config(e.to_string()))?;

        if config.retry_max_attempts == 0 {
            return Err(ForwarderError::Config(
                "RETRY_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// Current destination bus, read at call time
    pub fn event_bus_name() -> Option<String> {
        env::var(EVENT_BUS_ENV).ok()
    }
}
