//! OpenWeatherMap forecast provider.
//!
//! Calls the 5-day/3-hour forecast endpoint in metric units and flattens the
//! response into `ForecastEntry` slots.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::activity::Coordinates;
use crate::ports::{ForecastEntry, WeatherError, WeatherForecast, WeatherProvider};

#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenWeatherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openweathermap.org".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

pub struct OpenWeatherProvider {
    config: OpenWeatherConfig,
    client: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn forecast_url(&self) -> String {
        format!(
            "{}/data/2.5/forecast",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn map_transport_error(&self, e: reqwest::Error) -> WeatherError {
        if e.is_timeout() {
            WeatherError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            WeatherError::Unavailable(format!("Connection failed: {}", e))
        } else {
            WeatherError::Unavailable(e.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwmForecast {
    #[serde(default)]
    list: Vec<OwmSlot>,
    city: Option<OwmCity>,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmSlot {
    dt: i64,
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    wind: Option<OwmWind>,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

fn into_forecast(body: OwmForecast, coordinates: Coordinates) -> Result<WeatherForecast, WeatherError> {
    let entries = body
        .list
        .into_iter()
        .map(|slot| {
            let time = DateTime::<Utc>::from_timestamp(slot.dt, 0).ok_or_else(|| {
                WeatherError::InvalidResponse(format!("bad timestamp {}", slot.dt))
            })?;
            Ok(ForecastEntry {
                time,
                temperature_c: slot.main.temp,
                feels_like_c: slot.main.feels_like,
                humidity_percent: slot.main.humidity,
                wind_speed_mps: slot.wind.map(|w| w.speed).unwrap_or_default(),
                precipitation_probability: slot.pop,
                summary: slot
                    .weather
                    .into_iter()
                    .next()
                    .map(|c| c.description)
                    .unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    Ok(WeatherForecast {
        location_name: body.city.and_then(|c| c.name),
        latitude: coordinates.latitude,
        longitude: coordinates.longitude,
        entries,
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn forecast(&self, coordinates: Coordinates) -> Result<WeatherForecast, WeatherError> {
        let response = self
            .client
            .get(self.forecast_url())
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("appid", self.config.api_key().to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(WeatherError::Unauthorized),
            status => {
                return Err(WeatherError::Unavailable(format!(
                    "weather service answered {}",
                    status
                )))
            }
        }

        let body: OwmForecast = response
            .json()
            .await
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;

        into_forecast(body, coordinates)
    }
}
