//! In-process request dispatch ("mediator").
//!
//! Every command and query is a plain value implementing [`Request`]. Exactly
//! one [`RequestHandler`] is registered per request type in a
//! [`HandlerRegistry`], and the [`Mediator`] routes each request to it through
//! a fixed [`Pipeline`] of cross-cutting behaviors:
//!
//! ```text
//! send ─▶ Tracing ─▶ Validation ─▶ Metrics ─▶ handler
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut registry = HandlerRegistry::new();
//! registry.register::<GetOrders, _>(GetOrdersHandler::new(store))?;
//!
//! let metrics = Arc::new(InMemoryMetrics::new());
//! let mediator = Mediator::new(
//!     registry,
//!     Pipeline::standard(Arc::new(RequestValidator), metrics.clone()),
//! );
//!
//! let page = mediator
//!     .send(&RequestContext::background(), GetOrders::new(ListQuery::default()))
//!     .await?;
//! ```

pub mod behaviors;
mod dispatcher;
mod error;
mod handler;
mod http_mapping;
mod metrics;
mod pipeline;
mod registry;
mod request;
mod validation;

pub use dispatcher::Mediator;
pub use error::{DispatchError, Result};
pub use handler::{AnyResponse, DynHandler, RequestHandler};
pub use http_mapping::dispatch_error_to_status_code;
pub use metrics::{InMemoryMetrics, MetricsSink, Outcome, RequestCountersSnapshot};
pub use pipeline::{Next, Pipeline, PipelineBehavior};
pub use registry::HandlerRegistry;
pub use request::{DynRequest, Request, RequestKind};
pub use validation::{RequestValidator, ValidationErrors, Validator, Violation};
