//! Per-request [`RequestContext`](storefront_core::context::RequestContext)
//! construction for axum handlers.

mod extractor;

pub use extractor::Ctx;
