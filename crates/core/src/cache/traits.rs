use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// Implementations own their eviction and TTL policy. Values are opaque
/// bytes and every `set` replaces the whole value for a key.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. `Ok(None)` is an explicit miss.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;
}
