//! Catalog and order features: one request type and one handler per file.
//!
//! [`build_mediator`] is the single place where handlers are registered and
//! the pipeline is assembled.

pub mod orders;
pub mod products;

use std::sync::Arc;
use std::time::Duration;

use storefront_core::cache::Cache;
use storefront_core::context::RequestContext;
use storefront_core::mediator::{
    DispatchError, HandlerRegistry, Mediator, MetricsSink, Pipeline, RequestValidator,
    ValidationErrors, Violation,
};
use storefront_core::repository::{CacheAsideRepository, CacheableEntity, EntityStore};
use storefront_core::storage::{ListQuery, ListQueryError};

use crate::models::{Order, Product};
use crate::storage::{OrderRepository, ProductRepository};

pub type ProductCache = CacheAsideRepository<Product, dyn Cache, dyn ProductRepository>;
pub type OrderCache = CacheAsideRepository<Order, dyn Cache, dyn OrderRepository>;

/// Collaborators shared by the feature handlers.
#[derive(Clone)]
pub struct Dependencies {
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub product_cache: Arc<ProductCache>,
    pub order_cache: Arc<OrderCache>,
}

impl Dependencies {
    /// Puts one cache-aside repository per entity type in front of the stores.
    pub fn new(
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        cache: Arc<dyn Cache>,
        ttl: Duration,
    ) -> Self {
        let product_cache: Arc<ProductCache> = Arc::new(
            CacheAsideRepository::new(Arc::clone(&cache), Arc::clone(&products)).with_ttl(ttl),
        );
        let order_cache: Arc<OrderCache> =
            Arc::new(CacheAsideRepository::new(cache, Arc::clone(&orders)).with_ttl(ttl));

        Self {
            products,
            orders,
            product_cache,
            order_cache,
        }
    }
}

/// Registers every feature handler and wraps them in the standard pipeline.
///
/// Fails only on a duplicate registration, which is a startup bug.
pub fn build_mediator(
    deps: &Dependencies,
    metrics: Arc<dyn MetricsSink>,
) -> Result<Mediator, DispatchError> {
    let mut registry = HandlerRegistry::new();
    products::register(&mut registry, deps)?;
    orders::register(&mut registry, deps)?;

    Ok(Mediator::new(
        registry,
        Pipeline::standard(Arc::new(RequestValidator), metrics),
    ))
}

/// Brings the cache in line after a successful store write.
///
/// The fresh snapshot is written; if that fails the entry is dropped instead.
/// Only when both fail can a stale snapshot survive, and that is reported as
/// `DispatchError::Cache`.
pub(crate) async fn refresh_cache<E, S>(
    ctx: &RequestContext,
    cache: &CacheAsideRepository<E, dyn Cache, S>,
    entity: &E,
) -> Result<(), DispatchError>
where
    E: CacheableEntity,
    S: EntityStore<E> + ?Sized,
{
    let Err(put_err) = cache.put(ctx, entity).await else {
        return Ok(());
    };

    tracing::warn!(
        entity = E::ENTITY_TYPE,
        id = %entity.id(),
        error = %put_err,
        "Failed to refresh cache, invalidating"
    );

    cache.invalidate(ctx, entity.id()).await.map_err(|err| {
        tracing::error!(
            entity = E::ENTITY_TYPE,
            id = %entity.id(),
            error = %err,
            "Failed to invalidate cache, stale entry may be served"
        );
        DispatchError::from(err)
    })
}

/// Paging bounds check shared by the list queries.
pub(crate) fn validate_list_query(query: ListQuery) -> Result<(), ValidationErrors> {
    ListQuery::new(query.page, query.size)
        .map(|_| ())
        .map_err(|err| {
            let field = match err {
                ListQueryError::InvalidPage => "page",
                ListQueryError::InvalidSize { .. } => "size",
            };
            ValidationErrors::single(Violation::new(field, err.to_string()))
        })
}
