//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its collaborators.
///
/// None of these are fatal: every variant is handed back to the caller as a
/// plain `Err` and the cache stays usable afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not present (delete or update on an absent key)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// A configuration value could not be accepted
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The page address is not an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Retrieving a page failed
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        CacheError::Fetch(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
