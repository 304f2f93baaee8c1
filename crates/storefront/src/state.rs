//! Application state shared by every axum handler.
//!
//! The backends are chosen at compile time via feature flags; each supported
//! combination gets its own `AppState::new`.

use std::sync::Arc;

use storefront_core::cache::Cache;
use storefront_core::mediator::{InMemoryMetrics, Mediator};

use crate::config::Config;
use crate::features::{build_mediator, Dependencies};
use crate::storage::{OrderRepository, ProductRepository};

/// Shared application state.
///
/// Cloned for each request. Everything inside is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub mediator: Arc<Mediator>,
    pub metrics: Arc<InMemoryMetrics>,
    /// Kept for the cache-aside statistics exposed on `/metrics`.
    pub deps: Dependencies,
    pub config: Arc<Config>,
}

impl AppState {
    fn build(
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        cache: Arc<dyn Cache>,
        config: &Config,
    ) -> anyhow::Result<Self> {
        let deps = Dependencies::new(products, orders, cache, config.cache_ttl());
        let metrics = Arc::new(InMemoryMetrics::new());
        let mediator = build_mediator(&deps, metrics.clone())?;

        Ok(Self {
            mediator: Arc::new(mediator),
            metrics,
            deps,
            config: Arc::new(config.clone()),
        })
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use std::num::NonZeroUsize;

    use anyhow::Context;

    use super::*;
    use crate::cache::MemoryCache;
    use crate::mock_data;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            let capacity = NonZeroUsize::new(config.cache_max_entries)
                .context("CACHE_MAX_ENTRIES must be greater than zero")?;

            let repo = Arc::new(InMemoryRepository::new());
            if config.seed_demo_data {
                mock_data::seed(repo.as_ref()).await?;
            }

            let cache = Arc::new(MemoryCache::new(capacity));
            tracing::info!(capacity = capacity.get(), "Using in-memory cache");

            Self::build(repo.clone(), repo, cache, config)
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::mock_data;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and a Redis cache.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            let repo = Arc::new(InMemoryRepository::new());
            if config.seed_demo_data {
                mock_data::seed(repo.as_ref()).await?;
            }

            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            tracing::info!(url = %config.redis_url, "Using Redis cache");

            Self::build(repo.clone(), repo, cache, config)
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
