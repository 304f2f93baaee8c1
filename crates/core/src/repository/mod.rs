//! Cache-aside access to one entity type.
//!
//! [`CacheAsideRepository`] composes a [`crate::cache::Cache`] with an
//! authoritative [`EntityStore`]:
//!
//! - **Reads**: check the cache, fall back to the store on a miss or when the
//!   cache is unavailable, then repopulate the cache.
//! - **Writes**: the caller persists to the store, then calls `put` (or
//!   `invalidate`) to bring the cache in line.

mod cache_aside;
mod entity;
mod error;
mod stats;

pub use cache_aside::CacheAsideRepository;
pub use entity::{CacheableEntity, EntityStore};
pub use error::{CacheAsideError, Result};
pub use stats::CacheStats;
