//! Mock exchange-rate provider for tests and offline runs.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::CurrencyCode;
use crate::ports::{ExchangeRateError, ExchangeRateProvider};

/// Exchange-rate provider backed by a fixed rate table.
///
/// Identical currencies always convert at 1. Unknown pairs fail with
/// `UnsupportedPair`, and `failing` makes every lookup return one error.
#[derive(Debug, Clone, Default)]
pub struct MockExchangeRateProvider {
    rates: HashMap<(String, String), Decimal>,
    failure: Option<ExchangeRateError>,
    calls: Arc<Mutex<Vec<(CurrencyCode, CurrencyCode)>>>,
}

impl MockExchangeRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quoted rate for `from -> to`.
    pub fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> Self {
        self.rates
            .insert((from.to_ascii_uppercase(), to.to_ascii_uppercase()), rate);
        self
    }

    /// Makes every lookup fail with `error`.
    pub fn failing(mut self, error: ExchangeRateError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Pairs requested so far, in order.
    pub fn calls(&self) -> Vec<(CurrencyCode, CurrencyCode)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ExchangeRateProvider for MockExchangeRateProvider {
    async fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<Decimal, ExchangeRateError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((from.clone(), to.clone()));

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        if from == to {
            return Ok(Decimal::ONE);
        }
        self.rates
            .get(&(from.as_str().to_string(), to.as_str().to_string()))
            .copied()
            .ok_or_else(|| ExchangeRateError::UnsupportedPair {
                from: from.to_string(),
                to: to.to_string(),
            })
    }
}
