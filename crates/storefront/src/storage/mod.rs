//! Authoritative store for products and orders.
//!
//! The repository traits extend [`storefront_core::repository::EntityStore`]
//! so the same backend serves both the cache-aside reads and the command-side
//! writes.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local store, seeded with demo data at startup

#[cfg(not(feature = "inmemory"))]
compile_error!(
    "No storage backend selected. Enable the 'inmemory' feature. \
    Example: cargo build -p storefront --features inmemory"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;
mod traits;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;
pub use traits::{OrderRepository, ProductRepository};
