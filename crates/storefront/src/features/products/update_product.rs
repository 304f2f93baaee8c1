use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use storefront_core::context::RequestContext;
use storefront_core::mediator::{
    Request, RequestHandler, RequestKind, Result, ValidationErrors, Violation,
};
use storefront_core::repository::EntityStore;

use crate::features::{refresh_cache, Dependencies, ProductCache};
use crate::models::{Product, ProductId, UpdateProductPayload};
use crate::storage::ProductRepository;

/// Changes some fields of an existing product. Omitted fields are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub id: ProductId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl UpdateProduct {
    pub fn from_payload(id: ProductId, payload: UpdateProductPayload) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
        }
    }

    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        product.updated_at = Some(Utc::now());
    }
}

impl Request for UpdateProduct {
    type Response = Product;
    const NAME: &'static str = "UpdateProduct";
    const KIND: RequestKind = RequestKind::Command;

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        if self.name.is_none() && self.description.is_none() && self.price.is_none() {
            return Err(ValidationErrors::single(Violation::new(
                "body",
                "at least one field must be provided",
            )));
        }

        let mut violations = Vec::new();
        if let Some(name) = &self.name {
            super::check_name(name, &mut violations);
        }
        if let Some(price) = self.price {
            super::check_price(price, &mut violations);
        }
        ValidationErrors::check(violations)
    }
}

pub struct UpdateProductHandler {
    products: Arc<dyn ProductRepository>,
    cache: Arc<ProductCache>,
}

impl UpdateProductHandler {
    pub fn new(deps: &Dependencies) -> Self {
        Self {
            products: Arc::clone(&deps.products),
            cache: Arc::clone(&deps.product_cache),
        }
    }
}

#[async_trait]
impl RequestHandler<UpdateProduct> for UpdateProductHandler {
    async fn handle(&self, ctx: &RequestContext, command: UpdateProduct) -> Result<Product> {
        // Writes read the store directly so a stale cache entry is never the base.
        let mut product = ctx.run(self.products.get_by_id(&command.id)).await??;
        command.apply(&mut product);

        ctx.run(self.products.update_product(&product)).await??;
        refresh_cache(ctx, &self.cache, &product).await?;

        tracing::info!(product_id = %product.id, "Product updated");
        Ok(product)
    }
}
