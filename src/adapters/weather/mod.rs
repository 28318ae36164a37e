//! Weather collaborator adapters.

mod http;
mod mock;

pub use http::{OpenWeatherConfig, OpenWeatherProvider};
pub use mock::MockWeatherProvider;
