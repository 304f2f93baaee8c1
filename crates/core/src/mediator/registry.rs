use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use super::handler::HandlerAdapter;
use super::{DispatchError, DynHandler, Request, RequestHandler, RequestKind, Result};

struct Registration {
    name: &'static str,
    kind: RequestKind,
    handler: Arc<dyn DynHandler>,
}

/// Maps each request type to its single handler.
///
/// Filled at startup and then moved into the [`super::Mediator`], which only
/// ever reads it. Registering twice for one request type is an error.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<TypeId, Registration>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` as the handler for `R`.
    pub fn register<R, H>(&mut self, handler: H) -> Result<()>
    where
        R: Request,
        H: RequestHandler<R>,
    {
        let key = TypeId::of::<R>();
        if self.handlers.contains_key(&key) {
            return Err(DispatchError::DuplicateHandler { request: R::NAME });
        }

        tracing::debug!(request = R::NAME, kind = %R::KIND, "Registered request handler");
        self.handlers.insert(
            key,
            Registration {
                name: R::NAME,
                kind: R::KIND,
                handler: Arc::new(HandlerAdapter::<R, H>::new(handler)),
            },
        );
        Ok(())
    }

    /// Returns the handler for `R`, or `HandlerNotFound`.
    pub fn resolve<R: Request>(&self) -> Result<Arc<dyn DynHandler>> {
        self.handlers
            .get(&TypeId::of::<R>())
            .map(|registration| Arc::clone(&registration.handler))
            .ok_or(DispatchError::HandlerNotFound { request: R::NAME })
    }

    pub fn contains<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered request names with their kind, sorted by name.
    pub fn request_names(&self) -> Vec<(&'static str, RequestKind)> {
        let mut names: Vec<_> = self
            .handlers
            .values()
            .map(|registration| (registration.name, registration.kind))
            .collect();
        names.sort_by_key(|(name, _)| *name);
        names
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("requests", &self.request_names())
            .finish()
    }
}
