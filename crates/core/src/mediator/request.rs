use std::any::Any;
use std::fmt;

use serde::Serialize;

use super::ValidationErrors;

/// Whether a request mutates state or only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Command,
    Query,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Command => f.write_str("command"),
            RequestKind::Query => f.write_str("query"),
        }
    }
}

/// A command or query routed by the [`super::Mediator`].
///
/// `NAME` is the stable logical identity of the request type. It labels
/// spans, log lines and metrics, so keep it constant across refactors
/// instead of deriving it from `type_name`.
pub trait Request: fmt::Debug + Send + Sync + 'static {
    /// The typed success value produced by this request's handler.
    type Response: Send + 'static;

    const NAME: &'static str;
    const KIND: RequestKind;

    /// Structural validation run by the validation behavior before the
    /// handler is invoked.
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Object-safe view of a [`Request`] used while it travels the pipeline.
trait ErasedRequest: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn kind(&self) -> RequestKind;
    fn validate(&self) -> Result<(), ValidationErrors>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<R: Request> ErasedRequest for R {
    fn name(&self) -> &'static str {
        R::NAME
    }

    fn kind(&self) -> RequestKind {
        R::KIND
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        Request::validate(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// A type-erased request as seen by pipeline behaviors.
///
/// Behaviors inspect it through `name`, `kind`, `validate` and its `Debug`
/// output; only the handler adapter turns it back into the concrete type.
pub struct DynRequest {
    inner: Box<dyn ErasedRequest>,
}

impl DynRequest {
    pub fn new<R: Request>(request: R) -> Self {
        Self {
            inner: Box::new(request),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    pub fn kind(&self) -> RequestKind {
        self.inner.kind()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.inner.validate()
    }

    /// Takes the concrete request back out, or returns `self` unchanged if it
    /// is not an `R`.
    pub fn downcast<R: Request>(self) -> Result<R, Self> {
        if self.inner.as_any().is::<R>() {
            match self.inner.into_any().downcast::<R>() {
                Ok(request) => Ok(*request),
                Err(_) => unreachable!("type checked above"),
            }
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for DynRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediator::Violation;

    #[derive(Debug, PartialEq)]
    struct Ping {
        message: String,
    }

    impl Request for Ping {
        type Response = String;
        const NAME: &'static str = "Ping";
        const KIND: RequestKind = RequestKind::Query;

        fn validate(&self) -> Result<(), ValidationErrors> {
            if self.message.is_empty() {
                return Err(ValidationErrors::single(Violation::new(
                    "message",
                    "must not be empty",
                )));
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Pong;

    impl Request for Pong {
        type Response = ();
        const NAME: &'static str = "Pong";
        const KIND: RequestKind = RequestKind::Command;
    }

    #[test]
    fn test_dyn_request_exposes_identity() {
        let request = DynRequest::new(Ping {
            message: "hi".to_string(),
        });

        assert_eq!(request.name(), "Ping");
        assert_eq!(request.kind(), RequestKind::Query);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_dyn_request_debug_is_the_concrete_debug() {
        let request = DynRequest::new(Ping {
            message: "hi".to_string(),
        });

        assert_eq!(format!("{request:?}"), r#"Ping { message: "hi" }"#);
    }

    #[test]
    fn test_downcast_to_matching_type() {
        let request = DynRequest::new(Ping {
            message: "hi".to_string(),
        });

        let ping = request.downcast::<Ping>().unwrap();

        assert_eq!(
            ping,
            Ping {
                message: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_downcast_to_other_type_returns_request() {
        let request = DynRequest::new(Pong);

        let request = request.downcast::<Ping>().unwrap_err();

        assert_eq!(request.name(), "Pong");
    }

    #[test]
    fn test_default_validate_accepts() {
        assert!(DynRequest::new(Pong).validate().is_ok());
    }

    #[test]
    fn test_custom_validate_rejects() {
        let request = DynRequest::new(Ping {
            message: String::new(),
        });

        let errors = request.validate().unwrap_err();

        assert_eq!(errors.violations()[0].field, "message");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(RequestKind::Command.to_string(), "command");
        assert_eq!(RequestKind::Query.to_string(), "query");
    }
}
