use chrono::{Duration, Utc};

use storefront_core::storage::Result;

use crate::models::{Order, Product, ShopItem};
use crate::storage::{InMemoryRepository, OrderRepository, ProductRepository};

/// Demo catalog used when `SEED_DEMO_DATA` is on.
fn demo_products() -> Vec<Product> {
    vec![
        Product::new("Espresso Beans", "Dark roast, 1kg bag", 24.5),
        Product::new("Pour-over Kettle", "Gooseneck, 1L", 39.0),
        Product::new("Ceramic Dripper", "Fits size 02 filters", 18.0),
        Product::new("Paper Filters", "Pack of 100", 6.75),
        Product::new("Hand Grinder", "Conical burrs, 40 settings", 89.9),
    ]
}

/// Demo orders built from the demo catalog.
fn demo_orders(products: &[Product]) -> Vec<Order> {
    let item = |i: usize, quantity: u64| {
        let product = &products[i % products.len()];
        ShopItem::new(product.name.clone(), quantity, product.price)
            .with_description(product.description.clone())
    };
    let now = Utc::now();

    vec![
        Order::new(
            "ada@example.com",
            "12 Analytical St, London",
            now + Duration::hours(4),
            vec![item(0, 2), item(3, 1)],
        ),
        Order::new(
            "grace@example.com",
            "1 Compiler Way, Arlington",
            now + Duration::days(1),
            vec![item(1, 1), item(2, 1), item(3, 2)],
        ),
        Order::new(
            "linus@example.com",
            "5 Kernel Rd, Portland",
            now + Duration::days(2),
            vec![item(4, 1)],
        ),
    ]
}

/// Loads the demo data straight into the store.
pub async fn seed(repo: &InMemoryRepository) -> Result<()> {
    let products = demo_products();
    for product in &products {
        repo.create_product(product).await?;
    }

    let orders = demo_orders(&products);
    for order in &orders {
        repo.create_order(order).await?;
    }

    tracing::info!(
        products = products.len(),
        orders = orders.len(),
        "Seeded demo data"
    );
    Ok(())
}
