//! Exchange-rate collaborator adapters.

mod http;
mod mock;

pub use http::{HttpExchangeRateConfig, HttpExchangeRateProvider};
pub use mock::MockExchangeRateProvider;
