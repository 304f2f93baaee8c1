//! Core for the storefront services.
//!
//! Holds the pieces every storefront service shares and that carry no
//! transport or backend specifics:
//!
//! - [`mediator`]: typed request dispatch with an ordered pipeline of
//!   cross-cutting behaviors (tracing, validation, metrics).
//! - [`repository`]: the cache-aside repository used by query handlers.
//! - [`cache`] and [`storage`]: the capabilities those pieces consume.
//! - [`context`]: cancellation and deadlines threaded through every call.

pub mod cache;
pub mod context;
pub mod mediator;
pub mod repository;
pub mod storage;
