//! ttl_cache demo driver
//!
//! Seeds a cache, optionally fetches a page into it, then sweeps on a fixed
//! interval and logs lookups until interrupted.

use std::sync::Arc;

use tokio::signal;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{spawn_sweep_task, Cache, Config, PageFetcher, Ttl, Value};

/// Main entry point for the demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and seed it
/// 4. Start the background sweep task
/// 5. Log lookups on every tick and every sweep completion
/// 6. Stop on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: default_ttl={}, sweep_interval={:?}, read_policy={}",
        config.default_ttl, config.sweep_interval, config.read_policy
    );

    let cache: Arc<Cache<Value>> = Arc::new(Cache::new(&config));
    let mut watched: Vec<String> = Vec::new();

    if let Some(page) = &config.page_url {
        let fetcher = PageFetcher::new()?;
        match fetcher.retrieve_page(&*cache, page).await {
            Ok(key) => watched.push(key),
            Err(e) => warn!("Could not cache {}: {}", page, e),
        }
    }

    seed(&cache);
    watched.extend(["test", "test2", "test5"].map(String::from));
    log_lookups(&cache, &watched);

    let sweep_handle = spawn_sweep_task(cache.clone(), config.sweep_interval)?;
    info!("Background sweep task started");

    let mut sweeps = cache.subscribe();
    let mut ticker = tokio::time::interval(config.sweep_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = sweeps.changed() => {
                if changed.is_err() {
                    break;
                }
                let report = sweeps.borrow_and_update().clone();
                info!(
                    sweep = report.sweep,
                    removed = report.removed,
                    remaining = report.remaining,
                    "Cleaned cache"
                );
            }
            _ = ticker.tick() => {
                info!("Tick");
                log_lookups(&cache, &watched);
            }
            _ = &mut shutdown => break,
        }
    }

    sweep_handle.abort();
    warn!("Sweep task aborted");

    info!("Last sweep: {}", serde_json::to_string(&cache.last_sweep())?);
    info!("Final stats: {}", serde_json::to_string(&cache.stats())?);
    Ok(())
}

/// Writes the demo entries.
fn seed(cache: &Cache<Value>) {
    cache.set("test", Value::Int(12341234), Ttl::secs(20));
    cache.set("test2", Value::Int(234523634574), Ttl::Never);
    cache.set("test5", Value::from("asfgdfshsdfhshsh"), Ttl::secs(10));

    if let Err(e) = cache.update("test1034234", Value::Int(234123324), Ttl::Never) {
        warn!("Unable to update item: {}", e);
    }
}

fn log_lookups(cache: &Cache<Value>, keys: &[String]) {
    for key in keys {
        match cache.get(key) {
            Some(value) => info!("{} => {}", key, value),
            None => info!("{} => <missing>", key),
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
