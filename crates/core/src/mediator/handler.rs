use std::any::{type_name, Any};
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::context::RequestContext;

use super::{DispatchError, DynRequest, Request, Result};

/// Handles exactly one request type.
///
/// Handlers own their collaborators (repositories, caches) and receive the
/// caller's [`RequestContext`] so they can forward cancellation to I/O.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    async fn handle(&self, ctx: &RequestContext, request: R) -> Result<R::Response>;
}

/// A handler response with its concrete type erased.
pub type AnyResponse = Box<dyn Any + Send>;

/// Object-safe handler invoked at the end of the pipeline.
#[async_trait]
pub trait DynHandler: Send + Sync {
    /// Type name of the concrete handler, for diagnostics.
    fn handler_name(&self) -> &'static str;

    async fn handle_erased(&self, ctx: &RequestContext, request: DynRequest)
        -> Result<AnyResponse>;
}

/// Bridges a typed [`RequestHandler`] to [`DynHandler`].
pub(crate) struct HandlerAdapter<R, H> {
    handler: H,
    _request: PhantomData<fn(R)>,
}

impl<R, H> HandlerAdapter<R, H> {
    pub(crate) fn new(handler: H) -> Self {
        Self {
            handler,
            _request: PhantomData,
        }
    }
}

#[async_trait]
impl<R, H> DynHandler for HandlerAdapter<R, H>
where
    R: Request,
    H: RequestHandler<R>,
{
    fn handler_name(&self) -> &'static str {
        type_name::<H>()
    }

    async fn handle_erased(
        &self,
        ctx: &RequestContext,
        request: DynRequest,
    ) -> Result<AnyResponse> {
        let request = request.downcast::<R>().map_err(|other| {
            DispatchError::Internal(format!(
                "{} received a {} request",
                type_name::<H>(),
                other.name()
            ))
        })?;

        let response = self.handler.handle(ctx, request).await?;
        Ok(Box::new(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediator::RequestKind;

    #[derive(Debug)]
    struct Double(u32);

    impl Request for Double {
        type Response = u32;
        const NAME: &'static str = "Double";
        const KIND: RequestKind = RequestKind::Query;
    }

    #[derive(Debug)]
    struct Other;

    impl Request for Other {
        type Response = ();
        const NAME: &'static str = "Other";
        const KIND: RequestKind = RequestKind::Command;
    }

    struct DoubleHandler;

    #[async_trait]
    impl RequestHandler<Double> for DoubleHandler {
        async fn handle(&self, _ctx: &RequestContext, request: Double) -> Result<u32> {
            Ok(request.0 * 2)
        }
    }

    #[tokio::test]
    async fn test_adapter_returns_boxed_response() {
        let adapter = HandlerAdapter::<Double, _>::new(DoubleHandler);

        let response = adapter
            .handle_erased(&RequestContext::background(), DynRequest::new(Double(21)))
            .await
            .unwrap();

        assert_eq!(*response.downcast::<u32>().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_adapter_rejects_foreign_request() {
        let adapter = HandlerAdapter::<Double, _>::new(DoubleHandler);

        let result = adapter
            .handle_erased(&RequestContext::background(), DynRequest::new(Other))
            .await;

        assert!(matches!(result, Err(DispatchError::Internal(_))));
    }

    #[test]
    fn test_handler_name_is_concrete_type() {
        let adapter = HandlerAdapter::<Double, _>::new(DoubleHandler);

        assert!(adapter.handler_name().ends_with("DoubleHandler"));
    }
}
