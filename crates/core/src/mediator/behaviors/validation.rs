use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::mediator::{AnyResponse, DynRequest, Next, PipelineBehavior, Result, Validator};

/// Rejects structurally invalid requests before anything inside it runs.
pub struct ValidationBehavior {
    validator: Arc<dyn Validator>,
}

impl ValidationBehavior {
    pub fn new(validator: Arc<dyn Validator>) -> Self {
        Self { validator }
    }
}

#[async_trait]
impl PipelineBehavior for ValidationBehavior {
    fn name(&self) -> &'static str {
        "validation"
    }

    async fn handle(
        &self,
        ctx: &RequestContext,
        request: DynRequest,
        next: Next<'_>,
    ) -> Result<AnyResponse> {
        if let Err(errors) = self.validator.validate(&request) {
            tracing::debug!(
                request = request.name(),
                violations = errors.violations().len(),
                "Request failed validation"
            );
            return Err(errors.into());
        }

        next.run(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::mediator::{
        DispatchError, HandlerRegistry, Mediator, Pipeline, Request, RequestHandler, RequestKind,
        RequestValidator, ValidationErrors, Violation,
    };

    #[derive(Debug)]
    struct SetQuantity(i64);

    impl Request for SetQuantity {
        type Response = i64;
        const NAME: &'static str = "SetQuantity";
        const KIND: RequestKind = RequestKind::Command;

        fn validate(&self) -> std::result::Result<(), ValidationErrors> {
            if self.0 <= 0 {
                return Err(ValidationErrors::single(Violation::new(
                    "quantity",
                    "must be positive",
                )));
            }
            Ok(())
        }
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl RequestHandler<SetQuantity> for CountingHandler {
        async fn handle(&self, _ctx: &RequestContext, request: SetQuantity) -> Result<i64> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(request.0)
        }
    }

    fn mediator(calls: &Arc<AtomicUsize>) -> Mediator {
        let mut registry = HandlerRegistry::new();
        registry
            .register::<SetQuantity, _>(CountingHandler(Arc::clone(calls)))
            .unwrap();
        Mediator::new(
            registry,
            Pipeline::new().with(ValidationBehavior::new(Arc::new(RequestValidator))),
        )
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mediator = mediator(&calls);

        let result = mediator
            .send(&RequestContext::background(), SetQuantity(0))
            .await;

        match result {
            Err(DispatchError::Validation(errors)) => {
                assert_eq!(errors.violations()[0].field, "quantity");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_request_reaches_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mediator = mediator(&calls);

        let result = mediator
            .send(&RequestContext::background(), SetQuantity(3))
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
