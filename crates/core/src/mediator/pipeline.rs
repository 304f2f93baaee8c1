use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;

use crate::context::RequestContext;

use super::behaviors::{MetricsBehavior, TracingBehavior, ValidationBehavior};
use super::{AnyResponse, DispatchError, DynHandler, DynRequest, MetricsSink, Result, Validator};

/// A cross-cutting stage wrapped around every handler invocation.
///
/// Call `next.run(..)` to continue the chain, or return an error without
/// calling it to short-circuit. The handler at the end of the chain is bound
/// to the request context, so cancellation comes back out of `next.run` as
/// `Canceled` or `DeadlineExceeded`.
#[async_trait]
pub trait PipelineBehavior: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(
        &self,
        ctx: &RequestContext,
        request: DynRequest,
        next: Next<'_>,
    ) -> Result<AnyResponse>;
}

/// The remainder of the chain after the current behavior.
pub struct Next<'a> {
    behaviors: &'a [Arc<dyn PipelineBehavior>],
    handler: &'a dyn DynHandler,
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        behaviors: &'a [Arc<dyn PipelineBehavior>],
        handler: &'a dyn DynHandler,
    ) -> Self {
        Self { behaviors, handler }
    }

    pub async fn run(self, ctx: &RequestContext, request: DynRequest) -> Result<AnyResponse> {
        match self.behaviors.split_first() {
            Some((behavior, rest)) => {
                behavior
                    .handle(ctx, request, Next::new(rest, self.handler))
                    .await
            }
            None => {
                // Interruption surfaces here as an ordinary error so every
                // behavior still sees how the call ended.
                let handler = self.handler;
                let invocation =
                    AssertUnwindSafe(handler.handle_erased(ctx, request)).catch_unwind();
                match ctx.run(invocation).await {
                    Err(interrupted) => Err(interrupted.into()),
                    Ok(Ok(result)) => result,
                    Ok(Err(panic)) => Err(DispatchError::Internal(format!(
                        "{} panicked: {}",
                        handler.handler_name(),
                        panic_message(panic.as_ref())
                    ))),
                }
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

/// Ordered behaviors, outermost first. Fixed once the mediator is built.
#[derive(Clone, Default)]
pub struct Pipeline {
    behaviors: Vec<Arc<dyn PipelineBehavior>>,
}

impl Pipeline {
    /// An empty pipeline: requests go straight to their handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `behavior` inside every behavior added before it.
    pub fn with(mut self, behavior: impl PipelineBehavior + 'static) -> Self {
        self.behaviors.push(Arc::new(behavior));
        self
    }

    /// Tracing, then validation, then metrics.
    pub fn standard(validator: Arc<dyn Validator>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self::new()
            .with(TracingBehavior)
            .with(ValidationBehavior::new(validator))
            .with(MetricsBehavior::new(metrics))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|behavior| behavior.name()).collect()
    }

    pub(crate) async fn execute(
        &self,
        ctx: &RequestContext,
        request: DynRequest,
        handler: &dyn DynHandler,
    ) -> Result<AnyResponse> {
        Next::new(&self.behaviors, handler).run(ctx, request).await
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("behaviors", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::mediator::handler::HandlerAdapter;
    use crate::mediator::{Request, RequestHandler, RequestKind};

    #[derive(Debug)]
    struct Echo(&'static str);

    impl Request for Echo {
        type Response = &'static str;
        const NAME: &'static str = "Echo";
        const KIND: RequestKind = RequestKind::Query;
    }

    struct EchoHandler;

    #[async_trait]
    impl RequestHandler<Echo> for EchoHandler {
        async fn handle(&self, _ctx: &RequestContext, request: Echo) -> Result<&'static str> {
            if request.0 == "panic" {
                panic!("echo exploded");
            }
            Ok(request.0)
        }
    }

    struct Recording {
        label: &'static str,
        log: Arc<Mutex<Vec<String>>>,
        short_circuit: bool,
    }

    #[async_trait]
    impl PipelineBehavior for Recording {
        fn name(&self) -> &'static str {
            self.label
        }

        async fn handle(
            &self,
            ctx: &RequestContext,
            request: DynRequest,
            next: Next<'_>,
        ) -> Result<AnyResponse> {
            self.log.lock().unwrap().push(format!("{}:before", self.label));
            if self.short_circuit {
                return Err(DispatchError::Rejected(self.label.to_string()));
            }
            let result = next.run(ctx, request).await;
            self.log.lock().unwrap().push(format!("{}:after", self.label));
            result
        }
    }

    fn recording(label: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Recording {
        Recording {
            label,
            log: Arc::clone(log),
            short_circuit: false,
        }
    }

    #[tokio::test]
    async fn test_behaviors_wrap_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .with(recording("outer", &log))
            .with(recording("inner", &log));
        let handler = HandlerAdapter::<Echo, _>::new(EchoHandler);

        let response = pipeline
            .execute(&RequestContext::background(), DynRequest::new(Echo("hi")), &handler)
            .await
            .unwrap();

        assert_eq!(*response.downcast::<&'static str>().unwrap(), "hi");
        assert_eq!(
            *log.lock().unwrap(),
            vec!["outer:before", "inner:before", "inner:after", "outer:after"]
        );
        assert_eq!(pipeline.names(), vec!["outer", "inner"]);
    }

    #[tokio::test]
    async fn test_short_circuit_skips_inner_stages() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .with(Recording {
                label: "guard",
                log: Arc::clone(&log),
                short_circuit: true,
            })
            .with(recording("inner", &log));
        let handler = HandlerAdapter::<Echo, _>::new(EchoHandler);

        let result = pipeline
            .execute(&RequestContext::background(), DynRequest::new(Echo("hi")), &handler)
            .await;

        assert!(matches!(result, Err(DispatchError::Rejected(ref label)) if label == "guard"));
        assert_eq!(*log.lock().unwrap(), vec!["guard:before"]);
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_internal_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new().with(recording("outer", &log));
        let handler = HandlerAdapter::<Echo, _>::new(EchoHandler);

        let result = pipeline
            .execute(
                &RequestContext::background(),
                DynRequest::new(Echo("panic")),
                &handler,
            )
            .await;

        match result {
            Err(DispatchError::Internal(message)) => {
                assert!(message.contains("echo exploded"), "{message}")
            }
            _ => panic!("expected an internal error"),
        }
        assert_eq!(*log.lock().unwrap(), vec!["outer:before", "outer:after"]);
    }

    #[tokio::test]
    async fn test_interruption_returns_through_every_behavior() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .with(recording("outer", &log))
            .with(recording("inner", &log));
        let handler = HandlerAdapter::<Echo, _>::new(EchoHandler);
        let (ctx, cancel) = RequestContext::with_cancel();
        cancel.cancel();

        let result = pipeline
            .execute(&ctx, DynRequest::new(Echo("hi")), &handler)
            .await;

        assert!(matches!(result, Err(DispatchError::Canceled)));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["outer:before", "inner:before", "inner:after", "outer:after"]
        );
    }

    #[test]
    fn test_standard_pipeline_order() {
        let pipeline = Pipeline::standard(
            Arc::new(crate::mediator::RequestValidator),
            Arc::new(crate::mediator::InMemoryMetrics::new()),
        );

        assert_eq!(pipeline.names(), vec!["tracing", "validation", "metrics"]);
    }
}
