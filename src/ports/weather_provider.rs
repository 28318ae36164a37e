//! Weather collaborator port.
//!
//! Returns a forecast for a coordinate pair. Used only to annotate
//! activities; a failure never touches stored data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::activity::Coordinates;

/// One forecast time slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_percent: u8,
    pub wind_speed_mps: f64,
    pub precipitation_probability: f64,
    pub summary: String,
}

/// Forecast for a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub location_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub entries: Vec<ForecastEntry>,
}

/// Errors from weather lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("provider rejected credentials")]
    Unauthorized,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Port for weather forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn forecast(&self, coordinates: Coordinates) -> Result<WeatherForecast, WeatherError>;
}
