//! Byte caches behind [`storefront_core::cache::Cache`].
//!
//! Exactly one backend is compiled in:
//!
//! - `memory` (default): bounded LRU living in this process
//! - `redis`: shared Redis instance, for running several replicas

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cache features 'memory' and 'redis' cannot be enabled together.");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "Select a cache backend: `cargo build -p storefront --features memory` or `--features redis`."
);

// Router tests run on the LRU cache under either backend.
#[cfg(any(feature = "memory", test))]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(any(feature = "memory", test))]
pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
