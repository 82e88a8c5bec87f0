//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::Cache;
use crate::error::{CacheError, Result};

/// Spawns a background task that sweeps `cache` every `interval`.
///
/// The first sweep runs one full interval after spawning. Each sweep
/// publishes a [`SweepReport`](crate::cache::SweepReport) that callers can
/// await through [`Cache::subscribe`].
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval` - Time between sweeps; must be non-zero
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(Cache::<String>::new(&Config::default()));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(10))?;
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(cache: Arc<Cache<V>>, interval: Duration) -> Result<JoinHandle<()>>
where
    V: Send + 'static,
{
    if interval.is_zero() {
        return Err(CacheError::InvalidConfiguration(
            "sweep interval must be greater than zero".to_string(),
        ));
    }

    Ok(tokio::spawn(async move {
        info!(?interval, "Starting TTL sweep task");

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.sweep();

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, Ttl};
    use crate::config::Config;

    fn manual_cache() -> (Arc<Cache<String>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = Arc::new(Cache::with_clock(&Config::default(), clock.clone()));
        (cache, clock)
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let (cache, clock) = manual_cache();
        cache.set("expire_soon", "value".to_string(), Ttl::secs(1));
        clock.advance(Duration::from_secs(2));

        let mut rx = cache.subscribe();
        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(20)).unwrap();

        tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .expect("sweep did not run")
            .unwrap();

        assert_eq!(cache.stats().expired_removed, 1);
        assert!(cache.is_empty(), "Expired entry should have been swept");

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let (cache, _) = manual_cache();
        cache.set("long_lived", "value".to_string(), Ttl::secs(3600));

        let mut rx = cache.subscribe();
        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(20)).unwrap();

        // Let a couple of sweeps go by
        for _ in 0..2 {
            tokio::time::timeout(Duration::from_secs(5), rx.changed())
                .await
                .expect("sweep did not run")
                .unwrap();
        }

        assert_eq!(cache.get("long_lived"), Some("value".to_string()));
        assert!(cache.stats().sweeps >= 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_rejects_zero_interval() {
        let (cache, _) = manual_cache();

        let result = spawn_sweep_task(cache, Duration::ZERO);
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (cache, _) = manual_cache();

        let handle = spawn_sweep_task(cache, Duration::from_secs(1)).unwrap();
        handle.abort();

        let result = handle.await;
        assert!(result.unwrap_err().is_cancelled(), "Task should be cancelled after abort");
    }
}
