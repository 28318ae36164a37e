//! HTTP exchange-rate provider.
//!
//! Talks to an exchangerate-api style service: `GET {base}/v4/latest/{from}`
//! answers with `{ "base": "EUR", "rates": { "USD": 1.08, ... } }`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::foundation::CurrencyCode;
use crate::ports::{ExchangeRateError, ExchangeRateProvider};

#[derive(Debug, Clone)]
pub struct HttpExchangeRateConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpExchangeRateConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpExchangeRateProvider {
    config: HttpExchangeRateConfig,
    client: Client,
}

impl HttpExchangeRateProvider {
    pub fn new(config: HttpExchangeRateConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn latest_url(&self, from: &CurrencyCode) -> String {
        format!(
            "{}/v4/latest/{}",
            self.config.base_url.trim_end_matches('/'),
            from
        )
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ExchangeRateError {
        if e.is_timeout() {
            ExchangeRateError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ExchangeRateError::Unavailable(format!("Connection failed: {}", e))
        } else {
            ExchangeRateError::Unavailable(e.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRates {
    rates: HashMap<String, Decimal>,
}

/// Picks `to` out of a latest-rates body.
fn select_rate(
    body: LatestRates,
    from: &CurrencyCode,
    to: &CurrencyCode,
) -> Result<Decimal, ExchangeRateError> {
    match body.rates.get(to.as_str()) {
        Some(rate) if *rate > Decimal::ZERO => Ok(*rate),
        Some(rate) => Err(ExchangeRateError::InvalidResponse(format!(
            "non-positive rate {} for {}",
            rate, to
        ))),
        None => Err(ExchangeRateError::UnsupportedPair {
            from: from.to_string(),
            to: to.to_string(),
        }),
    }
}

#[async_trait]
impl ExchangeRateProvider for HttpExchangeRateProvider {
    async fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<Decimal, ExchangeRateError> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        let response = self
            .client
            .get(self.latest_url(from))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ExchangeRateError::UnsupportedPair {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ExchangeRateError::Unavailable(format!(
                "exchange-rate service answered {}",
                status
            )));
        }

        let body: LatestRates = response
            .json()
            .await
            .map_err(|e| ExchangeRateError::InvalidResponse(e.to_string()))?;

        select_rate(body, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn body(json: &str) -> LatestRates {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn url_has_no_double_slash() {
        let provider =
            HttpExchangeRateProvider::new(HttpExchangeRateConfig::new("https://rates.test/")).unwrap();
        assert_eq!(provider.latest_url(&code("EUR")), "https://rates.test/v4/latest/EUR");
    }

    #[test]
    fn selects_requested_rate() {
        let rates = body(r#"{ "base": "EUR", "rates": { "USD": 1.08, "JPY": 162.5 } }"#);
        assert_eq!(select_rate(rates, &code("EUR"), &code("JPY")).unwrap(), dec!(162.5));
    }

    #[test]
    fn missing_currency_is_unsupported() {
        let rates = body(r#"{ "rates": { "USD": 1.08 } }"#);
        assert_eq!(
            select_rate(rates, &code("EUR"), &code("GBP")),
            Err(ExchangeRateError::UnsupportedPair {
                from: "EUR".to_string(),
                to: "GBP".to_string()
            })
        );
    }

    #[test]
    fn zero_rate_is_invalid() {
        let rates = body(r#"{ "rates": { "USD": 0 } }"#);
        assert!(matches!(
            select_rate(rates, &code("EUR"), &code("USD")),
            Err(ExchangeRateError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn same_currency_never_calls_out() {
        let provider = HttpExchangeRateProvider::new(HttpExchangeRateConfig::new(
            "http://127.0.0.1:9",
        ))
        .unwrap();
        assert_eq!(provider.rate(&code("USD"), &code("USD")).await.unwrap(), Decimal::ONE);
    }

    #[tokio::test]
    async fn unreachable_service_is_reported_unavailable() {
        let provider = HttpExchangeRateProvider::new(
            HttpExchangeRateConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2)),
        )
        .unwrap();
        let err = provider.rate(&code("EUR"), &code("USD")).await.unwrap_err();
        assert!(matches!(
            err,
            ExchangeRateError::Unavailable(_) | ExchangeRateError::Timeout { .. }
        ));
    }
}
