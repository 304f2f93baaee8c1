use std::any::type_name;

use crate::context::RequestContext;

use super::{DispatchError, DynRequest, HandlerRegistry, Pipeline, Request, Result};

/// Routes each request to its registered handler through the pipeline.
///
/// Owns its registry, so the set of handlers is closed once the mediator is
/// built. `Mediator` is `Send + Sync`; share it behind an `Arc`.
#[derive(Debug)]
pub struct Mediator {
    registry: HandlerRegistry,
    pipeline: Pipeline,
}

impl Mediator {
    pub fn new(registry: HandlerRegistry, pipeline: Pipeline) -> Self {
        tracing::info!(
            handlers = registry.len(),
            behaviors = ?pipeline.names(),
            "Mediator ready"
        );
        Self { registry, pipeline }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Dispatches `request` and returns its handler's typed response.
    ///
    /// An unregistered request type fails with `HandlerNotFound` before any
    /// behavior runs. A context that is already done fails before the
    /// pipeline starts. Once the handler is running, cancellation or an
    /// expired deadline drops its work and `Canceled` or `DeadlineExceeded`
    /// travels back out through every behavior.
    pub async fn send<R: Request>(&self, ctx: &RequestContext, request: R) -> Result<R::Response> {
        let handler = self.registry.resolve::<R>().inspect_err(|err| {
            tracing::error!(request = R::NAME, error = %err, "Dispatch failed");
        })?;

        ctx.check()?;
        let response = self
            .pipeline
            .execute(ctx, DynRequest::new(request), handler.as_ref())
            .await?;

        response.downcast::<R::Response>().map(|boxed| *boxed).map_err(|_| {
            DispatchError::Internal(format!(
                "{} returned a response that is not {}",
                handler.handler_name(),
                type_name::<R::Response>()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::mediator::behaviors::{MetricsBehavior, ValidationBehavior};
    use crate::mediator::{
        AnyResponse, InMemoryMetrics, Next, PipelineBehavior, RequestHandler, RequestKind,
        RequestValidator, ValidationErrors, Violation,
    };

    #[derive(Debug)]
    struct Add(i32, i32);

    impl Request for Add {
        type Response = i32;
        const NAME: &'static str = "Add";
        const KIND: RequestKind = RequestKind::Query;

        fn validate(&self) -> std::result::Result<(), ValidationErrors> {
            if self.0 < 0 || self.1 < 0 {
                return Err(ValidationErrors::single(Violation::new(
                    "operands",
                    "must not be negative",
                )));
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Unregistered;

    impl Request for Unregistered {
        type Response = ();
        const NAME: &'static str = "Unregistered";
        const KIND: RequestKind = RequestKind::Command;
    }

    #[derive(Debug)]
    struct Slow;

    impl Request for Slow {
        type Response = ();
        const NAME: &'static str = "Slow";
        const KIND: RequestKind = RequestKind::Query;
    }

    struct AddHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RequestHandler<Add> for AddHandler {
        async fn handle(&self, _ctx: &RequestContext, request: Add) -> Result<i32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(request.0 + request.1)
        }
    }

    struct SlowHandler;

    #[async_trait]
    impl RequestHandler<Slow> for SlowHandler {
        async fn handle(&self, _ctx: &RequestContext, _request: Slow) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }
    }

    struct Recorder(Arc<Mutex<Vec<&'static str>>>);

    #[async_trait]
    impl PipelineBehavior for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        async fn handle(
            &self,
            ctx: &RequestContext,
            request: DynRequest,
            next: Next<'_>,
        ) -> Result<AnyResponse> {
            self.0.lock().unwrap().push(request.name());
            next.run(ctx, request).await
        }
    }

    struct Fixture {
        mediator: Mediator,
        calls: Arc<AtomicUsize>,
        metrics: Arc<InMemoryMetrics>,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    fn fixture() -> Fixture {
        let calls = Arc::new(AtomicUsize::new(0));
        let metrics = Arc::new(InMemoryMetrics::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut registry = HandlerRegistry::new();
        registry
            .register::<Add, _>(AddHandler {
                calls: Arc::clone(&calls),
            })
            .unwrap();
        registry.register::<Slow, _>(SlowHandler).unwrap();

        let pipeline = Pipeline::new()
            .with(Recorder(Arc::clone(&seen)))
            .with(ValidationBehavior::new(Arc::new(RequestValidator)))
            .with(MetricsBehavior::new(metrics.clone()));

        Fixture {
            mediator: Mediator::new(registry, pipeline),
            calls,
            metrics,
            seen,
        }
    }

    #[tokio::test]
    async fn test_send_returns_typed_response() {
        let fixture = fixture();

        let sum = fixture
            .mediator
            .send(&RequestContext::background(), Add(2, 3))
            .await;

        assert_eq!(sum, Ok(5));
        assert_eq!(fixture.calls.load(Ordering::SeqCst), 1);
        let counters = fixture.metrics.get("Add").unwrap();
        assert_eq!((counters.requests, counters.successes), (1, 1));
    }

    #[tokio::test]
    async fn test_unregistered_request_runs_no_behavior() {
        let fixture = fixture();

        let result = fixture
            .mediator
            .send(&RequestContext::background(), Unregistered)
            .await;

        assert_eq!(
            result,
            Err(DispatchError::HandlerNotFound {
                request: "Unregistered"
            })
        );
        assert!(fixture.seen.lock().unwrap().is_empty());
        assert!(fixture.metrics.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_skips_handler_and_metrics() {
        let fixture = fixture();

        let result = fixture
            .mediator
            .send(&RequestContext::background(), Add(-1, 3))
            .await;

        assert!(matches!(result, Err(DispatchError::Validation(_))));
        assert_eq!(fixture.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fixture.metrics.get("Add"), None);
        assert_eq!(*fixture.seen.lock().unwrap(), vec!["Add"]);
    }

    #[tokio::test]
    async fn test_canceled_context_stops_dispatch() {
        let fixture = fixture();
        let (ctx, handle) = RequestContext::with_cancel();

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let started = std::time::Instant::now();
        let result = fixture.mediator.send(&ctx, Slow).await;

        assert_eq!(result, Err(DispatchError::Canceled));
        assert!(started.elapsed() < Duration::from_secs(5));
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn test_deadline_stops_dispatch() {
        let fixture = fixture();
        let ctx = RequestContext::background().with_timeout(Duration::from_millis(20));

        let result = fixture.mediator.send(&ctx, Slow).await;

        assert_eq!(result, Err(DispatchError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_deadline_is_counted_as_failure() {
        let fixture = fixture();
        let ctx = RequestContext::background().with_timeout(Duration::from_millis(20));

        let result = fixture.mediator.send(&ctx, Slow).await;

        assert_eq!(result, Err(DispatchError::DeadlineExceeded));
        let counters = fixture.metrics.get("Slow").unwrap();
        assert_eq!(counters.requests, 1);
        assert_eq!(counters.failures, 1);
        assert_eq!(counters.requests, counters.successes + counters.failures);
    }

    #[tokio::test]
    async fn test_already_canceled_context_never_reaches_pipeline() {
        let fixture = fixture();
        let (ctx, handle) = RequestContext::with_cancel();
        handle.cancel();

        let result = fixture.mediator.send(&ctx, Add(1, 1)).await;

        assert_eq!(result, Err(DispatchError::Canceled));
        assert!(fixture.seen.lock().unwrap().is_empty());
        assert_eq!(fixture.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_sends_share_one_mediator() {
        let fixture = fixture();
        let mediator = Arc::new(fixture.mediator);

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let mediator = Arc::clone(&mediator);
                tokio::spawn(async move {
                    mediator
                        .send(&RequestContext::background(), Add(i, i))
                        .await
                })
            })
            .collect();

        for (i, task) in tasks.into_iter().enumerate() {
            assert_eq!(task.await.unwrap(), Ok(2 * i as i32));
        }
        assert_eq!(fixture.calls.load(Ordering::SeqCst), 16);
    }
}
