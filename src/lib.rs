//! ttl_cache - An in-process key-value cache
//!
//! Per-entry TTL expiration, a single coarse lock for concurrent callers, and
//! an externally scheduled sweep that evicts expired entries.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod tasks;

pub use cache::{Cache, Expiration, ReadPolicy, SweepReport, Ttl};
pub use config::Config;
pub use error::{CacheError, Result};
pub use fetch::PageFetcher;
pub use models::Value;
pub use tasks::spawn_sweep_task;
