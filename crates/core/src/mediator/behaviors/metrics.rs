use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::mediator::{
    AnyResponse, DynRequest, MetricsSink, Next, Outcome, PipelineBehavior, Result,
};

/// Counts every request that reaches the handler stage and how it ended.
///
/// The result passes through untouched.
pub struct MetricsBehavior {
    sink: Arc<dyn MetricsSink>,
}

impl MetricsBehavior {
    pub fn new(sink: Arc<dyn MetricsSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl PipelineBehavior for MetricsBehavior {
    fn name(&self) -> &'static str {
        "metrics"
    }

    async fn handle(
        &self,
        ctx: &RequestContext,
        request: DynRequest,
        next: Next<'_>,
    ) -> Result<AnyResponse> {
        let name = request.name();
        let started = Instant::now();
        self.sink.record_started(name);

        let result = next.run(ctx, request).await;

        let outcome = Outcome::of(&result);
        self.sink.record_completed(name, outcome);
        tracing::debug!(
            request = name,
            ?outcome,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Request handled"
        );

        result
    }
}
