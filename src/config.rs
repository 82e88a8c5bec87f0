//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::{parse_duration, Expiration, ReadPolicy};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Expiration applied when a caller asks for the default TTL
    pub default_ttl: Expiration,
    /// Interval between background sweeps
    pub sweep_interval: Duration,
    /// Whether reads hide expired entries the sweep has not removed yet
    pub read_policy: ReadPolicy,
    /// Page the demo driver fetches into the cache at startup
    pub page_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - `never`, `immediate`, seconds or `<n>ms` (default: 300)
    /// - `SWEEP_INTERVAL` - seconds or `<n>ms`, must be non-zero (default: 10)
    /// - `READ_POLICY` - `filter` or `trust-sweep` (default: filter)
    /// - `PAGE_URL` - optional page to fetch at startup
    ///
    /// Unset variables fall back to defaults; set but malformed values are
    /// reported as `CacheError::InvalidConfiguration`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_ttl = match lookup("DEFAULT_TTL") {
            Some(v) => v.parse::<Expiration>()?,
            None => defaults.default_ttl,
        };

        let sweep_interval = match lookup("SWEEP_INTERVAL") {
            Some(v) => parse_duration(&v)?,
            None => defaults.sweep_interval,
        };

        let read_policy = match lookup("READ_POLICY") {
            Some(v) => v.parse::<ReadPolicy>()?,
            None => defaults.read_policy,
        };

        let page_url = lookup("PAGE_URL").filter(|v| !v.trim().is_empty());

        let config = Self {
            default_ttl,
            sweep_interval,
            read_policy,
            page_url,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.sweep_interval.is_zero() {
            return Err(CacheError::InvalidConfiguration(
                "sweep interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: Expiration::After(Duration::from_secs(300)),
            sweep_interval: Duration::from_secs(10),
            read_policy: ReadPolicy::FilterExpired,
            page_url: None,
        }
    }
}
