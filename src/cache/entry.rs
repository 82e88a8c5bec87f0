//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::cache::Expiration;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// Entries are never mutated in place; set and update replace them whole.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry written at `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `expiration` - Resolved expiration rule
    /// * `now` - Instant the entry is written
    pub fn new(value: V, expiration: Expiration, now: Instant) -> Self {
        Self {
            value,
            expires_at: expiration.deadline(now),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches its
    /// expiration instant, so a zero TTL is expired from the moment it is
    /// written.
    ///
    /// # Returns
    /// - `true` if the entry has a TTL and `now` >= expiration instant
    /// - `false` if the entry never expires or the TTL hasn't elapsed
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => expires <= now,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}
