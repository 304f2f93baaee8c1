use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use storefront_core::storage::ListResult;

use crate::{
    context::Ctx,
    features::orders::{CreateOrder, GetOrderById, GetOrders},
    handlers::{AppError, PageParams},
    models::{CreateOrderPayload, Order, OrderId},
    state::AppState,
};

/// List orders (GET /api/v1/orders).
pub async fn list_orders(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Query(params): Query<PageParams>,
) -> Result<Json<ListResult<Order>>, AppError> {
    let page = state
        .mediator
        .send(&ctx, GetOrders { query: params.into() })
        .await?;
    Ok(Json(page))
}

/// Place an order (POST /api/v1/orders).
pub async fn create_order(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.mediator.send(&ctx, CreateOrder::from(payload)).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Get a single order (GET /api/v1/orders/{id}).
pub async fn get_order(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .mediator
        .send(
            &ctx,
            GetOrderById {
                id: OrderId::from_uuid(id),
            },
        )
        .await?;
    Ok(Json(order))
}
