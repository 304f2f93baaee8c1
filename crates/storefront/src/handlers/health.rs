//! Liveness check.

use axum::http::StatusCode;

/// GET /livez - returns 200 as soon as the server accepts connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
