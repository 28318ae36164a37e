//! Currency codes and percentage arithmetic over exact decimals.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Three-letter ISO-style currency code, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code, upper-casing ASCII letters.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "expected a three-letter code such as USD",
            ));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// US dollars, the default for new budgets and rate lookups.
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Largest amount accepted for a single money field (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Returns `part / whole * 100` rounded half-up to two decimals.
///
/// A zero `whole` yields zero regardless of `part`. A ratio outside the
/// decimal range saturates to `Decimal::MAX` (or `MIN` for mixed signs).
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(if part.is_sign_negative() != whole.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Sums amounts, clamping at the decimal range instead of overflowing.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_code_is_upper_cased() {
        assert_eq!(CurrencyCode::new("jpy").unwrap().as_str(), "JPY");
    }

    #[test]
    fn currency_code_rejects_bad_input() {
        assert!(CurrencyCode::new("").is_err());
        assert!(CurrencyCode::new("US").is_err());
        assert!(CurrencyCode::new("US1").is_err());
        assert!(CurrencyCode::new("EURO").is_err());
    }

    #[test]
    fn currency_code_deserializes_through_validation() {
        let code: CurrencyCode = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(code.as_str(), "EUR");
        assert!(serde_json::from_str::<CurrencyCode>("\"12\"").is_err());
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage_of(dec!(500), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn percentage_of_rounds_to_two_places() {
        assert_eq!(percentage_of(dec!(18.50), dec!(400)), dec!(4.63));
        assert_eq!(percentage_of(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(percentage_of(dec!(600), dec!(400)), dec!(150));
    }

    #[test]
    fn max_amount_is_one_trillion() {
        assert_eq!(MAX_AMOUNT, dec!(1_000_000_000_000));
    }

    #[test]
    fn percentage_of_saturates_instead_of_overflowing() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(percentage_of(MAX_AMOUNT, tiny), Decimal::MAX);
        assert_eq!(percentage_of(-MAX_AMOUNT, tiny), Decimal::MIN);
        assert_eq!(percentage_of(Decimal::MAX, dec!(0.5)), Decimal::MAX);
    }

    #[test]
    fn saturating_sum_clamps_at_the_decimal_range() {
        assert_eq!(saturating_sum([dec!(1.25), dec!(2.75)]), dec!(4));
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
    }
}
