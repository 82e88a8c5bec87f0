//! Shared Cache Module
//!
//! Thread-safe front for [`CacheStore`]: one mutex around the whole map, a
//! clock for expiration checks and a watch channel announcing finished sweeps.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::cache::{CacheStats, CacheStore, Clock, Expiration, ReadPolicy, SystemClock, Ttl};
use crate::config::Config;
use crate::error::Result;

// == Sweep Report ==
/// Published after every sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepReport {
    /// Sequence number, starting at 1 for the first sweep
    pub sweep: u64,
    /// Entries removed by this sweep
    pub removed: usize,
    /// Entries left after this sweep
    pub remaining: usize,
    /// Wall-clock completion time
    pub completed_at: Option<DateTime<Utc>>,
}

// == Cache ==
/// Concurrency-safe TTL cache.
///
/// Every operation holds the lock for its whole duration, so no caller ever
/// observes a half-applied operation. The cache owns no threads; see
/// [`spawn_sweep_task`](crate::tasks::spawn_sweep_task) for periodic sweeping.
#[derive(Debug)]
pub struct Cache<V> {
    store: Mutex<CacheStore<V>>,
    clock: Arc<dyn Clock>,
    sweeps: watch::Sender<SweepReport>,
}

impl<V> Cache<V> {
    // == Constructors ==
    /// Creates a cache reading the system clock.
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let (sweeps, _) = watch::channel(SweepReport::default());
        Self {
            store: Mutex::new(CacheStore::new(config.default_ttl, config.read_policy)),
            clock,
            sweeps,
        }
    }

    // == Set ==
    /// Inserts or overwrites `key`.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Ttl) {
        let mut store = self.lock();
        let now = self.clock.now();
        store.set(key.into(), value, ttl, now);
    }

    // == Delete ==
    /// Removes `key`; `CacheError::NotFound` if it was absent.
    ///
    /// An expired entry not yet swept is still removed and reported as `Ok`,
    /// even though [`update`](Self::update) and [`exists`](Self::exists)
    /// treat it as absent under `ReadPolicy::FilterExpired`.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.lock().delete(key)
    }

    // == Update ==
    /// Replaces `key` only if it is present; `CacheError::NotFound` otherwise.
    ///
    /// The existence check and the write happen under one lock acquisition.
    pub fn update(&self, key: &str, value: V, ttl: Ttl) -> Result<()> {
        let mut store = self.lock();
        let now = self.clock.now();
        store.update(key, value, ttl, now)
    }

    // == Exists ==
    /// Reports whether `key` is present under the configured read policy.
    pub fn exists(&self, key: &str) -> bool {
        let store = self.lock();
        store.contains(key, self.clock.now())
    }

    // == Sweep ==
    /// Removes every expired entry and returns how many were removed.
    ///
    /// One instant is sampled for the whole pass. The report is published
    /// before the lock is released, so reports appear in sweep order.
    pub fn sweep(&self) -> usize {
        let mut store = self.lock();
        let now = self.clock.now();
        let removed = store.sweep(now);
        let stats = store.stats();

        self.sweeps.send_replace(SweepReport {
            sweep: stats.sweeps,
            removed,
            remaining: store.len(),
            completed_at: stats.last_sweep_at,
        });

        removed
    }

    /// Receiver that is marked changed each time a sweep completes.
    pub fn subscribe(&self) -> watch::Receiver<SweepReport> {
        self.sweeps.subscribe()
    }

    /// Report of the most recent sweep, or the default if none has run.
    pub fn last_sweep(&self) -> SweepReport {
        self.sweeps.borrow().clone()
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn default_ttl(&self) -> Expiration {
        self.lock().default_ttl()
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.lock().read_policy()
    }

    /// Poisoning is ignored: no store operation leaves the map half-written.
    fn lock(&self) -> MutexGuard<'_, CacheStore<V>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Cache<V> {
    // == Get ==
    /// Returns a copy of the value for `key`, if present under the read policy.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut store = self.lock();
        let now = self.clock.now();
        store.get(key, now).cloned()
    }
}
