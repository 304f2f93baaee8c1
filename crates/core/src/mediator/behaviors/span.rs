use async_trait::async_trait;
use tracing::field::Empty;
use tracing::{Instrument, Span};

use crate::context::RequestContext;
use crate::mediator::{AnyResponse, DynRequest, Next, PipelineBehavior, Result};

/// Opens one span per dispatched request and records how it ended.
///
/// The span carries the request name as `otel.name`, its kind and its
/// `Debug` payload. `outcome` is one of `success`, `failure` or `aborted`;
/// the last one is recorded when the call is dropped before finishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBehavior;

struct OutcomeGuard {
    span: Span,
    recorded: bool,
}

impl OutcomeGuard {
    fn finish(mut self, result: &Result<AnyResponse>) {
        self.recorded = true;
        match result {
            Ok(_) => {
                self.span.record("outcome", "success");
            }
            Err(err) => {
                self.span.record("outcome", "failure");
                self.span.record("error", tracing::field::display(err));
            }
        }
    }
}

impl Drop for OutcomeGuard {
    fn drop(&mut self) {
        if !self.recorded {
            self.span.record("outcome", "aborted");
        }
    }
}

#[async_trait]
impl PipelineBehavior for TracingBehavior {
    fn name(&self) -> &'static str {
        "tracing"
    }

    async fn handle(
        &self,
        ctx: &RequestContext,
        request: DynRequest,
        next: Next<'_>,
    ) -> Result<AnyResponse> {
        let span = tracing::info_span!(
            "mediator.send",
            otel.name = request.name(),
            request.kind = %request.kind(),
            request.payload = ?request,
            correlation_id = %ctx.correlation_id(),
            outcome = Empty,
            error = Empty,
        );
        let guard = OutcomeGuard {
            span: span.clone(),
            recorded: false,
        };

        let result = next.run(ctx, request).instrument(span.clone()).await;

        guard.finish(&result);
        span.in_scope(|| match &result {
            Ok(_) => tracing::debug!("Request succeeded"),
            Err(err) => tracing::warn!(error = %err, "Request failed"),
        });

        result
    }
}
