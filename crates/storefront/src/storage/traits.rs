use async_trait::async_trait;

use storefront_core::repository::EntityStore;
use storefront_core::storage::{ListQuery, ListResult, Result};

use crate::models::{Order, Product};

/// Write and listing operations for the product catalog.
#[async_trait]
pub trait ProductRepository: EntityStore<Product> {
    /// Fails with `AlreadyExists` if the id is taken.
    async fn create_product(&self, product: &Product) -> Result<()>;

    /// Replaces a stored product. Fails with `NotFound` if it does not exist.
    async fn update_product(&self, product: &Product) -> Result<()>;

    /// Lists products in insertion order.
    async fn list_products(&self, query: ListQuery) -> Result<ListResult<Product>>;
}

/// Write and listing operations for orders.
#[async_trait]
pub trait OrderRepository: EntityStore<Order> {
    /// Fails with `AlreadyExists` if the id is taken.
    async fn create_order(&self, order: &Order) -> Result<()>;

    /// Lists orders in insertion order.
    async fn list_orders(&self, query: ListQuery) -> Result<ListResult<Order>>;
}
