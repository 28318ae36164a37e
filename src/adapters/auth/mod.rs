//! Authentication adapters for the `SessionValidator` port.
//!
//! - `jwt` - HS256 tokens signed with the identity service's shared secret
//! - `mock` - fixed token table for tests

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
