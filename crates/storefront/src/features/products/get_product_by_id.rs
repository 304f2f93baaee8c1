use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::context::RequestContext;
use storefront_core::mediator::{Request, RequestHandler, RequestKind, Result};

use crate::features::{Dependencies, ProductCache};
use crate::models::{Product, ProductId};

/// Reads one product through the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetProductById {
    pub id: ProductId,
}

impl Request for GetProductById {
    type Response = Product;
    const NAME: &'static str = "GetProductById";
    const KIND: RequestKind = RequestKind::Query;
}

pub struct GetProductByIdHandler {
    cache: Arc<ProductCache>,
}

impl GetProductByIdHandler {
    pub fn new(deps: &Dependencies) -> Self {
        Self {
            cache: Arc::clone(&deps.product_cache),
        }
    }
}

#[async_trait]
impl RequestHandler<GetProductById> for GetProductByIdHandler {
    async fn handle(&self, ctx: &RequestContext, query: GetProductById) -> Result<Product> {
        let product = self.cache.get(ctx, &query.id).await?;
        tracing::debug!(product_id = %product.id, "Product fetched");
        Ok(product)
    }
}
