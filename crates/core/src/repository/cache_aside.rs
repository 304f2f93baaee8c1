use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{deserialize_value, serialize_value, Cache};
use crate::context::RequestContext;

use super::stats::StatCounters;
use super::{CacheStats, CacheableEntity, EntityStore, Result};

/// Read-through cache in front of an authoritative store.
///
/// - **Reads**: cache first. A hit returns without touching the store. A miss,
///   a corrupt payload or an unavailable cache falls back to the store and
///   then repopulates the cache. Store failures are returned verbatim.
/// - **Writes**: `put` overwrites the cached snapshot and `invalidate` drops
///   it. Both report cache failures to the caller.
///
/// Concurrent misses for the same id each read the store and each write the
/// cache; the last writer wins.
///
/// # Type Parameters
///
/// * `E` - The entity type
/// * `C` - The cache implementation
/// * `S` - The authoritative store
pub struct CacheAsideRepository<E, C: ?Sized, S: ?Sized> {
    cache: Arc<C>,
    store: Arc<S>,
    ttl: Option<Duration>,
    counters: StatCounters,
    _entity: PhantomData<fn() -> E>,
}

impl<E, C, S> CacheAsideRepository<E, C, S>
where
    E: CacheableEntity,
    C: Cache + ?Sized,
    S: EntityStore<E> + ?Sized,
{
    /// Creates a repository whose cache entries never expire on their own.
    pub fn new(cache: Arc<C>, store: Arc<S>) -> Self {
        Self {
            cache,
            store,
            ttl: None,
            counters: StatCounters::default(),
            _entity: PhantomData,
        }
    }

    /// Sets the TTL passed to the cache on every write.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Returns the entity for `id`, from the cache when possible.
    ///
    /// Cancellation or an expired deadline while waiting on the cache or the
    /// store returns `Interrupted`. Once the store has answered, a failure to
    /// repopulate the cache (including cancellation) is logged and the entity
    /// is still returned.
    pub async fn get(&self, ctx: &RequestContext, id: &E::Id) -> Result<E> {
        let key = E::cache_key(id);

        match ctx.run(self.cache.get(&key)).await? {
            Ok(Some(bytes)) => match deserialize_value::<E>(&bytes) {
                Ok(entity) => {
                    StatCounters::bump(&self.counters.hits);
                    tracing::trace!(entity = E::ENTITY_TYPE, id = %id, "Cache hit");
                    return Ok(entity);
                }
                Err(err) => {
                    StatCounters::bump(&self.counters.misses);
                    tracing::warn!(
                        entity = E::ENTITY_TYPE,
                        id = %id,
                        error = %err,
                        "Cached payload unreadable, treating as miss"
                    );
                }
            },
            Ok(None) => {
                StatCounters::bump(&self.counters.misses);
                tracing::trace!(entity = E::ENTITY_TYPE, id = %id, "Cache miss");
            }
            Err(err) => {
                StatCounters::bump(&self.counters.cache_errors);
                tracing::warn!(
                    entity = E::ENTITY_TYPE,
                    id = %id,
                    error = %err,
                    "Cache unavailable, reading from store"
                );
            }
        }

        let entity = match ctx.run(self.store.get_by_id(id)).await? {
            Ok(entity) => entity,
            Err(err) => {
                StatCounters::bump(&self.counters.store_failures);
                tracing::debug!(entity = E::ENTITY_TYPE, id = %id, error = %err, "Store read failed");
                return Err(err.into());
            }
        };

        self.populate(ctx, &key, &entity).await;
        Ok(entity)
    }

    async fn populate(&self, ctx: &RequestContext, key: &str, entity: &E) {
        let bytes = match serialize_value(entity) {
            Ok(bytes) => bytes,
            Err(err) => {
                StatCounters::bump(&self.counters.populate_failures);
                tracing::warn!(key, error = %err, "Failed to serialize entity for cache");
                return;
            }
        };

        match ctx.run(self.cache.set(key, &bytes, self.ttl)).await {
            Ok(Ok(())) => tracing::trace!(key, "Cache populated"),
            Ok(Err(err)) => {
                StatCounters::bump(&self.counters.populate_failures);
                tracing::warn!(key, error = %err, "Failed to populate cache");
            }
            Err(interrupted) => {
                StatCounters::bump(&self.counters.populate_failures);
                tracing::debug!(key, reason = %interrupted, "Cache population interrupted");
            }
        }
    }

    /// Replaces the cached snapshot of `entity`.
    pub async fn put(&self, ctx: &RequestContext, entity: &E) -> Result<()> {
        let key = E::cache_key(entity.id());
        let bytes = serialize_value(entity)?;

        ctx.run(self.cache.set(&key, &bytes, self.ttl)).await??;

        tracing::trace!(entity = E::ENTITY_TYPE, id = %entity.id(), "Cache updated");
        Ok(())
    }

    /// Drops the cached snapshot for `id`, if any.
    pub async fn invalidate(&self, ctx: &RequestContext, id: &E::Id) -> Result<()> {
        let key = E::cache_key(id);

        ctx.run(self.cache.delete(&key)).await??;

        tracing::trace!(entity = E::ENTITY_TYPE, id = %id, "Cache invalidated");
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}
