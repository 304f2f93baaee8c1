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
    features::products::{CreateProduct, GetProductById, GetProducts, UpdateProduct},
    handlers::{AppError, PageParams},
    models::{CreateProductPayload, Product, ProductId, UpdateProductPayload},
    state::AppState,
};

/// List products (GET /api/v1/products).
pub async fn list_products(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Query(params): Query<PageParams>,
) -> Result<Json<ListResult<Product>>, AppError> {
    let page = state
        .mediator
        .send(&ctx, GetProducts { query: params.into() })
        .await?;
    Ok(Json(page))
}

/// Create a product (POST /api/v1/products).
pub async fn create_product(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = state
        .mediator
        .send(&ctx, CreateProduct::from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Get a single product (GET /api/v1/products/{id}).
pub async fn get_product(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .mediator
        .send(
            &ctx,
            GetProductById {
                id: ProductId::from_uuid(id),
            },
        )
        .await?;
    Ok(Json(product))
}

/// Update a product (PUT /api/v1/products/{id}).
pub async fn update_product(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .mediator
        .send(
            &ctx,
            UpdateProduct::from_payload(ProductId::from_uuid(id), payload),
        )
        .await?;
    Ok(Json(product))
}
