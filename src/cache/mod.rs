//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL expiration and sweeping.

mod clock;
mod entry;
mod shared;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use shared::{Cache, SweepReport};
pub use stats::CacheStats;
pub use store::{CacheStore, ReadPolicy};
pub use ttl::{parse_duration, Expiration, Ttl};
