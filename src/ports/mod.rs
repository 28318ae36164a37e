//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `TripRepository` - Trip lifecycle, itinerary, atomic create and cascade delete
//! - `BudgetRepository` - Budget ledger with atomic spend maintenance
//! - `PackingRepository` - Packing lists with id-targeted item updates
//! - `ActivityRepository` - Activities kept in step with the itinerary
//!
//! ## Collaborator Ports
//!
//! - `SessionValidator` - Identity collaborator (bearer token to user)
//! - `ExchangeRateProvider` - Currency conversion rates
//! - `WeatherProvider` - Forecasts for activity locations

mod activity_repository;
mod budget_repository;
mod exchange_rate_provider;
mod packing_repository;
mod session_validator;
mod trip_repository;
mod weather_provider;

pub use activity_repository::ActivityRepository;
pub use budget_repository::BudgetRepository;
pub use exchange_rate_provider::{ExchangeRateError, ExchangeRateProvider};
pub use packing_repository::PackingRepository;
pub use session_validator::SessionValidator;
pub use trip_repository::TripRepository;
pub use weather_provider::{ForecastEntry, WeatherError, WeatherForecast, WeatherProvider};
