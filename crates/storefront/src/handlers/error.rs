use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::Level;

use storefront_core::mediator::{dispatch_error_to_status_code, DispatchError};

/// A dispatch failure rendered as a JSON error response.
#[derive(Debug)]
pub struct AppError(pub DispatchError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = dispatch_error_to_status_code(&self.0);
        let status_code =
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match log_level(&self.0, status_code) {
            Some(level) if level == Level::ERROR => {
                tracing::error!(error = %self.0, status = code, "Request failed")
            }
            Some(_) => tracing::debug!(error = %self.0, status = code, "Request interrupted"),
            None => {}
        }

        let body = match &self.0 {
            DispatchError::Validation(errors) => json!({
                "error": "Validation failed",
                "violations": errors.violations(),
            }),
            other => json!({ "error": other.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}

/// Wiring mistakes and server faults are errors. A client that gave up or
/// ran out of time is routine and only worth a debug line.
fn log_level(err: &DispatchError, status: StatusCode) -> Option<Level> {
    if err.is_configuration() {
        Some(Level::ERROR)
    } else if err.is_interrupted() {
        Some(Level::DEBUG)
    } else if status.is_server_error() {
        Some(Level::ERROR)
    } else {
        None
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        Self(err)
    }
}
