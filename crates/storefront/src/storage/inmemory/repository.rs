//! In-memory repository implementation.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use storefront_core::repository::{CacheableEntity, EntityStore};
use storefront_core::storage::{ListQuery, ListResult, RepositoryError, Result};

use crate::models::{Order, OrderId, Product, ProductId};
use crate::storage::{OrderRepository, ProductRepository};

/// Rows keyed by id plus the order they were inserted in.
#[derive(Debug)]
struct Table<E: CacheableEntity> {
    rows: HashMap<E::Id, E>,
    order: Vec<E::Id>,
}

impl<E> Table<E>
where
    E: CacheableEntity,
    E::Id: Hash + Eq,
{
    fn new() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn get(&self, id: &E::Id) -> Result<E> {
        self.rows
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(E::ENTITY_TYPE, id))
    }

    fn insert(&mut self, entity: &E) -> Result<()> {
        let id = entity.id();
        if self.rows.contains_key(id) {
            return Err(RepositoryError::already_exists(E::ENTITY_TYPE, id));
        }
        self.order.push(id.clone());
        self.rows.insert(id.clone(), entity.clone());
        Ok(())
    }

    fn replace(&mut self, entity: &E) -> Result<()> {
        let Some(row) = self.rows.get_mut(entity.id()) else {
            return Err(RepositoryError::not_found(E::ENTITY_TYPE, entity.id()));
        };
        *row = entity.clone();
        Ok(())
    }

    fn list(&self, query: ListQuery) -> ListResult<E> {
        let all = self
            .order
            .iter()
            .filter_map(|id| self.rows.get(id).cloned())
            .collect();
        ListResult::paginate(all, query)
    }
}

/// In-memory storage backend.
///
/// Cloning shares the underlying tables.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    products: Arc<RwLock<Table<Product>>>,
    orders: Arc<RwLock<Table<Order>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(Table::new())),
            orders: Arc::new(RwLock::new(Table::new())),
        }
    }
}

#[async_trait]
impl EntityStore<Product> for InMemoryRepository {
    async fn get_by_id(&self, id: &ProductId) -> Result<Product> {
        self.products.read().await.get(id)
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn create_product(&self, product: &Product) -> Result<()> {
        self.products.write().await.insert(product)
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.products.write().await.replace(product)
    }

    async fn list_products(&self, query: ListQuery) -> Result<ListResult<Product>> {
        Ok(self.products.read().await.list(query))
    }
}

#[async_trait]
impl EntityStore<Order> for InMemoryRepository {
    async fn get_by_id(&self, id: &OrderId) -> Result<Order> {
        self.orders.read().await.get(id)
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepository {
    async fn create_order(&self, order: &Order) -> Result<()> {
        self.orders.write().await.insert(order)
    }

    async fn list_orders(&self, query: ListQuery) -> Result<ListResult<Order>> {
        Ok(self.orders.read().await.list(query))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::ShopItem;

    fn order(email: &str) -> Order {
        Order::new(
            email,
            "1 Main St",
            Utc::now(),
            vec![ShopItem::new("Widget", 1, 10.0)],
        )
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryRepository::new();
        let product = Product::new("Widget", "A widget", 9.99);

        repo.create_product(&product).await.unwrap();
        let found = EntityStore::<Product>::get_by_id(&repo, &product.id)
            .await
            .unwrap();

        assert_eq!(found, product);
    }

    #[tokio::test]
    async fn test_create_duplicate_product_fails() {
        let repo = InMemoryRepository::new();
        let product = Product::new("Widget", "A widget", 9.99);
        repo.create_product(&product).await.unwrap();

        let result = repo.create_product(&product).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let repo = InMemoryRepository::new();
        let id = ProductId::new();

        let result = EntityStore::<Product>::get_by_id(&repo, &id).await;

        assert_eq!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "product",
                id: id.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_update_replaces_product() {
        let repo = InMemoryRepository::new();
        let mut product = Product::new("Widget", "A widget", 9.99);
        repo.create_product(&product).await.unwrap();

        product.price = 19.99;
        repo.update_product(&product).await.unwrap();

        let found = EntityStore::<Product>::get_by_id(&repo, &product.id)
            .await
            .unwrap();
        assert_eq!(found.price, 19.99);
    }

    #[tokio::test]
    async fn test_update_missing_product_fails() {
        let repo = InMemoryRepository::new();

        let result = repo
            .update_product(&Product::new("Ghost", "", 1.0))
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_orders_keeps_insertion_order() {
        let repo = InMemoryRepository::new();
        let orders: Vec<Order> = (0..12).map(|i| order(&format!("user{i}@example.com"))).collect();
        for order in &orders {
            repo.create_order(order).await.unwrap();
        }

        let page = repo.list_orders(ListQuery::new(2, 5).unwrap()).await.unwrap();

        let emails: Vec<_> = page.items.iter().map(|o| o.account_email.as_str()).collect();
        assert_eq!(
            emails,
            vec![
                "user5@example.com",
                "user6@example.com",
                "user7@example.com",
                "user8@example.com",
                "user9@example.com",
            ]
        );
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();
        let order = order("jane@example.com");

        repo.create_order(&order).await.unwrap();

        let found = EntityStore::<Order>::get_by_id(&clone, &order.id)
            .await
            .unwrap();
        assert_eq!(found.id, order.id);
    }
}
