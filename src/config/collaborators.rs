//! Exchange-rate and weather collaborator configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::foundation::CurrencyCode;

#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorsConfig {
    /// Base URL of the exchange-rate service
    #[serde(default = "default_exchange_rate_base_url")]
    pub exchange_rate_base_url: String,

    /// Base URL of the forecast service
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    /// API key sent to the forecast service
    #[serde(default)]
    pub weather_api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Target currency used when an exchange-rate query names none
    #[serde(default = "default_target_currency")]
    pub default_target_currency: String,
}

impl CollaboratorsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The default target as a validated currency code.
    pub fn default_target(&self) -> Result<CurrencyCode, ValidationError> {
        CurrencyCode::new(&self.default_target_currency)
            .map_err(|_| ValidationError::InvalidDefaultCurrency)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.exchange_rate_base_url) {
            return Err(ValidationError::InvalidCollaboratorUrl("exchange_rate_base_url"));
        }
        if !is_http_url(&self.weather_base_url) {
            return Err(ValidationError::InvalidCollaboratorUrl("weather_base_url"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidCollaboratorTimeout);
        }
        self.default_target()?;
        Ok(())
    }
}

impl Default for CollaboratorsConfig {
    fn default() -> Self {
        Self {
            exchange_rate_base_url: default_exchange_rate_base_url(),
            weather_base_url: default_weather_base_url(),
            weather_api_key: None,
            timeout_secs: default_timeout(),
            default_target_currency: default_target_currency(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_exchange_rate_base_url() -> String {
    "https://api.exchangerate-api.com".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_target_currency() -> String {
    "USD".to_string()
}
