//! The standard pipeline behaviors.

mod metrics;
mod span;
mod validation;

pub use metrics::MetricsBehavior;
pub use span::TracingBehavior;
pub use validation::ValidationBehavior;
