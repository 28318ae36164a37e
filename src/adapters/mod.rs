//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT session validation (and a mock for tests)
//! - `exchange_rate` - Exchange-rate HTTP collaborator
//! - `http` - axum REST API
//! - `memory` - In-memory repositories used without a database and in tests
//! - `postgres` - sqlx repositories
//! - `weather` - Weather forecast HTTP collaborator

pub mod auth;
pub mod exchange_rate;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod weather;

pub use memory::MemoryStore;
