use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /metrics - per-request counters plus cache-aside statistics.
#[axum::debug_handler]
pub async fn metrics(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "requests": state.metrics.snapshot(),
        "caches": {
            "product": state.deps.product_cache.stats(),
            "order": state.deps.order_cache.stats(),
        },
    }))
}
