//! In-memory storage backend.
//!
//! Keeps products and orders in maps wrapped in `Arc<RwLock<_>>`. Listings
//! come back in insertion order. Data is lost when the process exits.

mod repository;

pub use repository::InMemoryRepository;
