//! Currency amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is below zero.
    #[error("amount cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount has more fractional digits than the currency allows.
    #[error("amount must have at most {max} decimal places (got {0})", max = Money::SCALE)]
    TooPrecise(Decimal),
}

/// A non-negative currency amount with at most two fractional digits.
///
/// Trailing zeros are significant for display (`1000.00` stays `1000.00`) but
/// not for equality (`1000.0 == 1000.00`).
///
/// ```
/// use credit_application_core::Money;
/// use rust_decimal::Decimal;
///
/// let value = Money::new(Decimal::new(100_000, 2)).unwrap();
/// assert_eq!(value.to_string(), "1000.00");
///
/// assert!(Money::new(Decimal::new(-1, 0)).is_err());
/// assert!(Money::new(Decimal::new(1_001, 3)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Maximum number of fractional digits (cents).
    pub const SCALE: u32 = 2;

    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount, rejecting negatives and sub-cent precision.
    ///
    /// Trailing zeros beyond two places (`10.500`) are accepted and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError`] if the amount is negative or has a non-zero
    /// digit after the second decimal place.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }

        if amount.scale() > Self::SCALE {
            let trimmed = amount.normalize();
            if trimmed.scale() > Self::SCALE {
                return Err(MoneyError::TooPrecise(amount));
            }
            let mut rescaled = trimmed;
            rescaled.rescale(Self::SCALE);
            return Ok(Self(rescaled));
        }

        Ok(Self(amount))
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_accepts_currency_amounts() {
        assert_eq!(Money::new(dec("0")).unwrap(), Money::ZERO);
        assert_eq!(Money::new(dec("5000.5")).unwrap().to_string(), "5000.5");
        assert_eq!(Money::new(dec("1000.00")).unwrap().to_string(), "1000.00");
    }

    #[test]
    fn test_drops_insignificant_trailing_zeros() {
        assert_eq!(Money::new(dec("10.500")).unwrap().to_string(), "10.50");
    }

    #[test]
    fn test_rejects_negative_and_sub_cent() {
        assert!(matches!(Money::new(dec("-0.01")), Err(MoneyError::Negative(_))));
        assert!(matches!(Money::new(dec("0.001")), Err(MoneyError::TooPrecise(_))));
    }

    #[test]
    fn test_equality_ignores_scale() {
        assert_eq!(Money::new(dec("1000.0")).unwrap(), Money::new(dec("1000.00")).unwrap());
    }

    #[test]
    fn test_deserialize_validates() {
        let money: Money = serde_json::from_str("\"1500.75\"").unwrap();
        assert_eq!(money.amount(), dec("1500.75"));
        assert!(serde_json::from_str::<Money>("\"-3\"").is_err());
    }
}
