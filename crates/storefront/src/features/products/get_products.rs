use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::context::RequestContext;
use storefront_core::mediator::{Request, RequestHandler, RequestKind, Result, ValidationErrors};
use storefront_core::storage::{ListQuery, ListResult};

use crate::features::{validate_list_query, Dependencies};
use crate::models::Product;
use crate::storage::ProductRepository;

/// Lists the catalog one page at a time, straight from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetProducts {
    pub query: ListQuery,
}

impl Request for GetProducts {
    type Response = ListResult<Product>;
    const NAME: &'static str = "GetProducts";
    const KIND: RequestKind = RequestKind::Query;

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_list_query(self.query)
    }
}

pub struct GetProductsHandler {
    products: Arc<dyn ProductRepository>,
}

impl GetProductsHandler {
    pub fn new(deps: &Dependencies) -> Self {
        Self {
            products: Arc::clone(&deps.products),
        }
    }
}

#[async_trait]
impl RequestHandler<GetProducts> for GetProductsHandler {
    async fn handle(
        &self,
        ctx: &RequestContext,
        query: GetProducts,
    ) -> Result<ListResult<Product>> {
        let page = ctx.run(self.products.list_products(query.query)).await??;
        tracing::debug!(
            page = page.page,
            returned = page.items.len(),
            total = page.total_items,
            "Products listed"
        );
        Ok(page)
    }
}
