use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::DynRequest;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The non-empty list of constraints a request violated.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("Validation failed: {}", join_violations(.violations))]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Returns `Ok(())` for an empty list, otherwise the errors.
    pub fn check(violations: Vec<Violation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// Structural validation capability injected into the validation behavior.
pub trait Validator: Send + Sync {
    fn validate(&self, request: &DynRequest) -> Result<(), ValidationErrors>;
}

/// Validator that defers to each request's own [`super::Request::validate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl Validator for RequestValidator {
    fn validate(&self, request: &DynRequest) -> Result<(), ValidationErrors> {
        request.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_empty_is_ok() {
        assert!(ValidationErrors::check(Vec::new()).is_ok());
    }

    #[test]
    fn test_check_collects_all_violations() {
        let errors = ValidationErrors::check(vec![
            Violation::new("page", "must be at least 1"),
            Violation::new("size", "must be at most 100"),
        ])
        .unwrap_err();

        assert_eq!(errors.violations().len(), 2);
        assert_eq!(
            errors.to_string(),
            "Validation failed: page: must be at least 1; size: must be at most 100"
        );
    }

    #[test]
    fn test_serializes_violations() {
        let errors = ValidationErrors::single(Violation::new("email", "is invalid"));

        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "violations": [{ "field": "email", "message": "is invalid" }]
            })
        );
    }
}
