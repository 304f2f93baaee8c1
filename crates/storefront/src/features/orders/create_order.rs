use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use storefront_core::context::RequestContext;
use storefront_core::mediator::{
    DispatchError, Request, RequestHandler, RequestKind, Result, ValidationErrors, Violation,
};

use crate::features::{refresh_cache, Dependencies, OrderCache};
use crate::models::{CreateOrderPayload, Order, OrderId, ShopItem};
use crate::storage::OrderRepository;

/// How far in the past a delivery time may be before the order is refused.
const DELIVERY_GRACE_SECONDS: i64 = 60;

/// Places an order. A missing delivery time means "as soon as possible".
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrder {
    pub account_email: String,
    pub delivery_address: String,
    pub delivery_time: Option<DateTime<Utc>>,
    pub shop_items: Vec<ShopItem>,
}

impl From<CreateOrderPayload> for CreateOrder {
    fn from(payload: CreateOrderPayload) -> Self {
        Self {
            account_email: payload.account_email,
            delivery_address: payload.delivery_address,
            delivery_time: payload.delivery_time,
            shop_items: payload.shop_items,
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl Request for CreateOrder {
    type Response = OrderId;
    const NAME: &'static str = "CreateOrder";
    const KIND: RequestKind = RequestKind::Command;

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut violations = Vec::new();

        if !is_plausible_email(&self.account_email) {
            violations.push(Violation::new(
                "account_email",
                "must be a valid email address",
            ));
        }
        if self.delivery_address.trim().is_empty() {
            violations.push(Violation::new("delivery_address", "must not be empty"));
        }
        if self.shop_items.is_empty() {
            violations.push(Violation::new("shop_items", "must contain at least one item"));
        }

        for (i, item) in self.shop_items.iter().enumerate() {
            if item.title.trim().is_empty() {
                violations.push(Violation::new(
                    format!("shop_items[{i}].title"),
                    "must not be empty",
                ));
            }
            if item.quantity == 0 {
                violations.push(Violation::new(
                    format!("shop_items[{i}].quantity"),
                    "must be at least 1",
                ));
            }
            if !item.price.is_finite() || item.price <= 0.0 {
                violations.push(Violation::new(
                    format!("shop_items[{i}].price"),
                    "must be greater than zero",
                ));
            }
        }

        ValidationErrors::check(violations)
    }
}

pub struct CreateOrderHandler {
    orders: Arc<dyn OrderRepository>,
    cache: Arc<OrderCache>,
}

impl CreateOrderHandler {
    pub fn new(deps: &Dependencies) -> Self {
        Self {
            orders: Arc::clone(&deps.orders),
            cache: Arc::clone(&deps.order_cache),
        }
    }
}

#[async_trait]
impl RequestHandler<CreateOrder> for CreateOrderHandler {
    async fn handle(&self, ctx: &RequestContext, command: CreateOrder) -> Result<OrderId> {
        let now = Utc::now();
        let delivery_time = command.delivery_time.unwrap_or(now);
        if delivery_time < now - Duration::seconds(DELIVERY_GRACE_SECONDS) {
            return Err(DispatchError::Rejected(format!(
                "delivery time {delivery_time} is in the past"
            )));
        }

        let order = Order::new(
            command.account_email,
            command.delivery_address,
            delivery_time,
            command.shop_items,
        );

        ctx.run(self.orders.create_order(&order)).await??;
        refresh_cache(ctx, &self.cache, &order).await?;

        tracing::info!(
            order_id = %order.id,
            items = order.shop_items.len(),
            total_price = order.total_price,
            "Order created"
        );
        Ok(order.id)
    }
}
