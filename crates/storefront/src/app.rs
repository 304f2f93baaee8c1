use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        metrics::metrics,
        orders::{create_order, get_order, list_orders},
        products::{create_product, get_product, list_products, update_product},
    },
    state::AppState,
};

/// Slack given to the mediator's own deadline before the transport gives up.
const TIMEOUT_SLACK: Duration = Duration::from_secs(1);

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")]);

    let api_routes = Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", get(get_product).put(update_product))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order))
        .layer(cors);

    let timeout = state.config.request_timeout() + TIMEOUT_SLACK;

    Router::new()
        .route("/livez", get(livez))
        .route("/metrics", get(metrics))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}
