//! Order features.

mod create_order;
mod get_order_by_id;
mod get_orders;

pub use create_order::{CreateOrder, CreateOrderHandler};
pub use get_order_by_id::{GetOrderById, GetOrderByIdHandler};
pub use get_orders::{GetOrders, GetOrdersHandler};

use storefront_core::mediator::{HandlerRegistry, Result};

use super::Dependencies;

pub fn register(registry: &mut HandlerRegistry, deps: &Dependencies) -> Result<()> {
    registry.register::<CreateOrder, _>(CreateOrderHandler::new(deps))?;
    registry.register::<GetOrderById, _>(GetOrderByIdHandler::new(deps))?;
    registry.register::<GetOrders, _>(GetOrdersHandler::new(deps))?;
    Ok(())
}
