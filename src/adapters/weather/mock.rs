//! Mock weather provider for tests and offline runs.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex};

use crate::domain::activity::Coordinates;
use crate::ports::{ForecastEntry, WeatherError, WeatherForecast, WeatherProvider};

/// Weather provider that returns a canned mild forecast.
#[derive(Debug, Clone, Default)]
pub struct MockWeatherProvider {
    failure: Option<WeatherError>,
    calls: Arc<Mutex<Vec<Coordinates>>>,
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every lookup fail with `error`.
    pub fn failing(mut self, error: WeatherError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Coordinates requested so far.
    pub fn calls(&self) -> Vec<Coordinates> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn forecast(&self, coordinates: Coordinates) -> Result<WeatherForecast, WeatherError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(coordinates);

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let start = Utc::now();
        let entries = (0..4)
            .map(|step| ForecastEntry {
                time: start + Duration::hours(3 * step),
                temperature_c: 18.0 + step as f64,
                feels_like_c: 17.5 + step as f64,
                humidity_percent: 60,
                wind_speed_mps: 2.5,
                precipitation_probability: 0.1,
                summary: "few clouds".to_string(),
            })
            .collect();

        Ok(WeatherForecast {
            location_name: None,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            entries,
        })
    }
}
