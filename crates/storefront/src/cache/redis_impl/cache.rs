//! Redis cache implementation.
//!
//! Values are stored as plain strings under their entity keys. TTLs use
//! `SETEX` with whole seconds, rounded up to at least one.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use storefront_core::cache::{Cache, CacheError, Result};

/// Classifies a Redis failure. `op` names the command for the message.
fn cache_error(op: &'static str, err: redis::RedisError) -> CacheError {
    let message = format!("{op}: {err}");
    if err.is_connection_refusal()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_io_error()
    {
        CacheError::ConnectionFailed(message)
    } else if err.kind() == redis::ErrorKind::TypeError {
        CacheError::Serialization(message)
    } else {
        CacheError::OperationFailed(message)
    }
}

/// Redis cache backend using connection manager for pooling.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| cache_error("OPEN", e))?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(|e| cache_error("CONNECT", e))?;
        tracing::info!(url, "Connected to Redis cache");
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(|e| cache_error("GET", e))?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(|e| cache_error("SETEX", e))?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(|e| cache_error("SET", e))?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| cache_error("DEL", e))?;
        Ok(())
    }
}
