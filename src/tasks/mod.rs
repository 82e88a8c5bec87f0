//! Background Tasks Module
//!
//! Schedulers that drive the cache from outside; the cache itself owns no
//! threads.
//!
//! # Tasks
//! - Sweep: removes expired cache entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
