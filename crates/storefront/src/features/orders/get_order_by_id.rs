use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::context::RequestContext;
use storefront_core::mediator::{Request, RequestHandler, RequestKind, Result};

use crate::features::{Dependencies, OrderCache};
use crate::models::{Order, OrderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOrderById {
    pub id: OrderId,
}

impl Request for GetOrderById {
    type Response = Order;
    const NAME: &'static str = "GetOrderById";
    const KIND: RequestKind = RequestKind::Query;
}

pub struct GetOrderByIdHandler {
    cache: Arc<OrderCache>,
}

impl GetOrderByIdHandler {
    pub fn new(deps: &Dependencies) -> Self {
        Self {
            cache: Arc::clone(&deps.order_cache),
        }
    }
}

#[async_trait]
impl RequestHandler<GetOrderById> for GetOrderByIdHandler {
    async fn handle(&self, ctx: &RequestContext, query: GetOrderById) -> Result<Order> {
        let order = self.cache.get(ctx, &query.id).await?;
        tracing::debug!(order_id = %order.id, "Order fetched");
        Ok(order)
    }
}
