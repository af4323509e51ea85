//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are small dollar amounts such as `12.99`. They are held as
//! [`Decimal`] so that order totals add up exactly. Addition is checked and
//! reports overflow as `None`.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store currency (US dollars).
///
/// Serialized as a JSON number (`12.99`), matching the side-store layout
/// written by earlier clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    ///
    /// ```
    /// use model_store_core::Price;
    ///
    /// assert_eq!(Price::from_cents(1299).to_string(), "$12.99");
    /// ```
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Add two prices, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Sum `prices`, returning `None` if the total overflows.
    ///
    /// ```
    /// use model_store_core::Price;
    ///
    /// let prices = [Price::from_cents(1000), Price::from_cents(500)];
    /// assert_eq!(Price::checked_sum(prices), Some(Price::from_cents(1500)));
    /// ```
    #[must_use]
    pub fn checked_sum(prices: impl IntoIterator<Item = Self>) -> Option<Self> {
        prices
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount = trimmed.strip_prefix('$').unwrap_or(trimmed);
        Decimal::from_str_exact(amount).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_is_exact() {
        let prices = [Price::from_cents(1299), Price::from_cents(2499), Price::from_cents(1850)];
        let total = Price::checked_sum(prices).unwrap();
        assert_eq!(total, Price::from_cents(5648));
        assert_eq!(total.to_string(), "$56.48");
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total = Price::checked_sum(Vec::new()).unwrap();
        assert_eq!(total, Price::ZERO);
        assert_eq!(total.to_string(), "$0.00");
    }

    #[test]
    fn test_whole_numbers_compare_equal_to_cents() {
        let ten: Price = "10".parse().unwrap();
        let five: Price = "$5".parse().unwrap();
        assert_eq!(ten.checked_add(five), Some(Price::from_cents(1500)));
    }

    #[test]
    fn test_overflow_is_none() {
        let max = Price::new(Decimal::MAX);
        assert_eq!(max.checked_add(Price::from_cents(100)), None);
        assert_eq!(Price::checked_sum([max, Price::from_cents(100)]), None);
        assert_eq!(Price::checked_sum([max]), Some(max));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Price::from_cents(899)).unwrap();
        assert_eq!(json, "8.99");

        let parsed: Price = serde_json::from_str("32.99").unwrap();
        assert_eq!(parsed, Price::from_cents(3299));
    }
}
