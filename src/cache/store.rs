//! Cache Store Module
//!
//! Main cache engine: HashMap storage with TTL expiration. The store does no
//! locking of its own and takes the current instant as an argument; the
//! [`Cache`](crate::cache::Cache) wrapper supplies both.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Expiration, Ttl};
use crate::error::{CacheError, Result};

// == Read Policy ==
/// How lookups treat entries that have expired but not yet been swept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Expired entries read as absent until the sweep removes them
    #[default]
    FilterExpired,
    /// Whatever is stored is returned; freshness depends on sweep cadence
    TrustSweep,
}

impl fmt::Display for ReadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadPolicy::FilterExpired => write!(f, "filter"),
            ReadPolicy::TrustSweep => write!(f, "trust-sweep"),
        }
    }
}

impl FromStr for ReadPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filter" | "filter-expired" => Ok(ReadPolicy::FilterExpired),
            "trust-sweep" | "trust" => Ok(ReadPolicy::TrustSweep),
            other => Err(CacheError::InvalidConfiguration(format!(
                "unknown read policy '{}'",
                other
            ))),
        }
    }
}

// == Cache Store ==
/// Cache storage with per-entry TTL.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Lookup and sweep statistics
    stats: CacheStats,
    /// Expiration applied for `Ttl::Default`
    default_ttl: Expiration,
    /// Treatment of expired-but-unswept entries on read
    read_policy: ReadPolicy,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - Expiration used when a caller passes `Ttl::Default`
    /// * `read_policy` - Whether reads hide expired entries
    pub fn new(default_ttl: Expiration, read_policy: ReadPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
            read_policy,
        }
    }

    // == Set ==
    /// Stores a key-value pair, replacing any previous entry for the key.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Requested TTL, resolved against the default
    /// * `now` - Instant the write happens
    pub fn set(&mut self, key: String, value: V, ttl: Ttl, now: Instant) {
        let entry = CacheEntry::new(value, ttl.resolve(self.default_ttl), now);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Looks up a value, counting a hit or miss.
    ///
    /// Under [`ReadPolicy::FilterExpired`] an expired entry is reported as
    /// absent but left in place for the sweep.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<&V> {
        if self.contains(key, now) {
            self.stats.record_hit();
            self.entries.get(key).map(|entry| &entry.value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Contains ==
    /// Reports presence under the read policy. Does not touch stats.
    pub fn contains(&self, key: &str, now: Instant) -> bool {
        match self.entries.get(key) {
            Some(entry) => self.is_visible(entry, now),
            None => false,
        }
    }

    /// Returns the full entry, ignoring the read policy.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Delete ==
    /// Removes an entry by key, expired or not.
    ///
    /// Unlike [`update`](Self::update), the presence check ignores the read
    /// policy: an expired entry still waiting for the sweep is removed and
    /// reported as `Ok` even under `FilterExpired`, where `get`, `contains`
    /// and `update` already treat it as absent.
    ///
    /// # Arguments
    /// * `key` - The key to delete
    pub fn delete(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.stats.set_total_entries(self.entries.len());
            Ok(())
        } else {
            debug!(key, "delete: key not found");
            Err(CacheError::NotFound(key.to_string()))
        }
    }

    // == Update ==
    /// Replaces an existing entry; fails without inserting if the key is absent.
    ///
    /// The presence check follows the read policy, so an expired entry cannot
    /// be revived under `FilterExpired`.
    pub fn update(&mut self, key: &str, value: V, ttl: Ttl, now: Instant) -> Result<()> {
        if !self.contains(key, now) {
            debug!(key, "update: key not found");
            return Err(CacheError::NotFound(key.to_string()));
        }

        self.set(key.to_string(), value, ttl, now);
        Ok(())
    }

    // == Sweep ==
    /// Removes every entry expired as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - self.entries.len();

        self.stats.record_sweep(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn default_ttl(&self) -> Expiration {
        self.default_ttl
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_visible(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        match self.read_policy {
            ReadPolicy::FilterExpired => !entry.is_expired(now),
            ReadPolicy::TrustSweep => true,
        }
    }
}
