//! In-memory persistence adapter.

mod store;

pub use store::MemoryStore;
