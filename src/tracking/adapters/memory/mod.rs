//! In-memory adapters for tracking persistence.

mod store;

pub use store::InMemoryTrackingStore;
