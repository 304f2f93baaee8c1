//! Axum extractor for RequestContext.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use storefront_core::context::RequestContext;

use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The context every dispatched request runs under.
///
/// Carries the configured request deadline and the caller's `x-request-id`
/// as correlation id. Dropping the handler future (client gone) drops every
/// call running under it.
#[derive(Debug, Clone)]
pub struct Ctx(pub RequestContext);

fn extract_correlation_id(headers: &HeaderMap) -> Uuid {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

impl FromRequestParts<AppState> for Ctx {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = RequestContext::background()
            .with_timeout(state.config.request_timeout())
            .with_correlation_id(extract_correlation_id(&parts.headers));

        Ok(Ctx(ctx))
    }
}
