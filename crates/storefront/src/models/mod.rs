mod order;
mod product;

pub use order::{CreateOrderPayload, Order, OrderId, ShopItem};
pub use product::{CreateProductPayload, Product, ProductId, UpdateProductPayload};
