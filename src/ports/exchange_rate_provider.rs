//! Exchange-rate collaborator port.
//!
//! Looks up the conversion rate for a currency pair. Implementations must
//! bound every call with a timeout; callers treat any error as the rate
//! being unavailable and never let it affect stored budget data.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::foundation::CurrencyCode;

/// Errors from exchange-rate lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeRateError {
    /// The collaborator did not answer in time.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Network or server failure.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The collaborator does not quote the requested pair.
    #[error("no rate quoted for {from} -> {to}")]
    UnsupportedPair { from: String, to: String },

    /// The response could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Port for currency conversion rates.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Returns how many units of `to` one unit of `from` buys.
    async fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<Decimal, ExchangeRateError>;
}
