use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::context::RequestContext;
use storefront_core::mediator::{
    Request, RequestHandler, RequestKind, Result, ValidationErrors,
};

use crate::features::{refresh_cache, Dependencies, ProductCache};
use crate::models::{CreateProductPayload, Product, ProductId};
use crate::storage::ProductRepository;

/// Adds a product to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<CreateProductPayload> for CreateProduct {
    fn from(payload: CreateProductPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            price: payload.price,
        }
    }
}

impl Request for CreateProduct {
    type Response = ProductId;
    const NAME: &'static str = "CreateProduct";
    const KIND: RequestKind = RequestKind::Command;

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut violations = Vec::new();
        super::check_name(&self.name, &mut violations);
        super::check_price(self.price, &mut violations);
        ValidationErrors::check(violations)
    }
}

pub struct CreateProductHandler {
    products: Arc<dyn ProductRepository>,
    cache: Arc<ProductCache>,
}

impl CreateProductHandler {
    pub fn new(deps: &Dependencies) -> Self {
        Self {
            products: Arc::clone(&deps.products),
            cache: Arc::clone(&deps.product_cache),
        }
    }
}

#[async_trait]
impl RequestHandler<CreateProduct> for CreateProductHandler {
    async fn handle(&self, ctx: &RequestContext, command: CreateProduct) -> Result<ProductId> {
        let product = Product::new(command.name, command.description, command.price);

        ctx.run(self.products.create_product(&product)).await??;
        refresh_cache(ctx, &self.cache, &product).await?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product.id)
    }
}
