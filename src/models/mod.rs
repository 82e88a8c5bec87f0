//! Payload models stored in the cache.

pub mod value;

pub use value::Value;
