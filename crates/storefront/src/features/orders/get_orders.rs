use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::context::RequestContext;
use storefront_core::mediator::{Request, RequestHandler, RequestKind, Result, ValidationErrors};
use storefront_core::storage::{ListQuery, ListResult};

use crate::features::{validate_list_query, Dependencies};
use crate::models::Order;
use crate::storage::OrderRepository;

/// Lists orders in the order they were placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOrders {
    pub query: ListQuery,
}

impl Request for GetOrders {
    type Response = ListResult<Order>;
    const NAME: &'static str = "GetOrders";
    const KIND: RequestKind = RequestKind::Query;

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_list_query(self.query)
    }
}

pub struct GetOrdersHandler {
    orders: Arc<dyn OrderRepository>,
}

impl GetOrdersHandler {
    pub fn new(deps: &Dependencies) -> Self {
        Self {
            orders: Arc::clone(&deps.orders),
        }
    }
}

#[async_trait]
impl RequestHandler<GetOrders> for GetOrdersHandler {
    async fn handle(&self, ctx: &RequestContext, query: GetOrders) -> Result<ListResult<Order>> {
        let page = ctx.run(self.orders.list_orders(query.query)).await??;
        tracing::debug!(
            page = page.page,
            returned = page.items.len(),
            total = page.total_items,
            "Orders listed"
        );
        Ok(page)
    }
}
