//! TTL Module
//!
//! Time-to-live requests and their resolved expiration rules.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::error::{CacheError, Result};

// == Ttl ==
/// TTL requested by a caller on set/update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Use the cache's configured default
    Default,
    /// Never expire
    Never,
    /// Expire after the given duration; zero means already due for removal
    After(Duration),
}

impl Ttl {
    /// Shorthand for `Ttl::After(Duration::from_secs(secs))`.
    pub fn secs(secs: u64) -> Self {
        Ttl::After(Duration::from_secs(secs))
    }

    // == Resolve ==
    /// Resolves the request against the cache default.
    pub fn resolve(self, default: Expiration) -> Expiration {
        match self {
            Ttl::Default => default,
            Ttl::Never => Expiration::Never,
            Ttl::After(duration) => Expiration::After(duration),
        }
    }
}

// == Expiration ==
/// A resolved expiration rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    Never,
    After(Duration),
}

impl Expiration {
    /// Expire as soon as the entry is written.
    pub const IMMEDIATE: Expiration = Expiration::After(Duration::ZERO);

    /// Absolute deadline for an entry written at `now`, `None` if it never expires.
    pub fn deadline(self, now: Instant) -> Option<Instant> {
        match self {
            Expiration::Never => None,
            // Deadlines beyond the range of Instant never expire
            Expiration::After(duration) => now.checked_add(duration),
        }
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiration::Never => write!(f, "never"),
            Expiration::After(d) if d.is_zero() => write!(f, "immediate"),
            Expiration::After(d) => write!(f, "{:?}", d),
        }
    }
}

impl FromStr for Expiration {
    type Err = CacheError;

    /// Accepts `never`/`none`, `immediate`, or a duration understood by
    /// [`parse_duration`].
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" | "none" => Ok(Expiration::Never),
            "immediate" => Ok(Expiration::IMMEDIATE),
            other => parse_duration(other).map(Expiration::After),
        }
    }
}

// == Duration Parsing ==
/// Parses `"<n>"` or `"<n>s"` as seconds and `"<n>ms"` as milliseconds.
///
/// Negative values are rejected rather than clamped.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if s.starts_with('-') {
        return Err(CacheError::InvalidConfiguration(format!(
            "negative duration '{}' is not allowed",
            s
        )));
    }

    let (digits, millis) = if let Some(n) = s.strip_suffix("ms") {
        (n, true)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, false)
    } else {
        (s, false)
    };

    let value: u64 = digits.trim().parse().map_err(|_| {
        CacheError::InvalidConfiguration(format!("'{}' is not a valid duration", s))
    })?;

    Ok(if millis {
        Duration::from_millis(value)
    } else {
        Duration::from_secs(value)
    })
}
