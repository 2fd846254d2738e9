//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number")]
    Invalid,
    /// The amount is zero or negative.
    #[error("price must be positive")]
    NotPositive,
}

/// A price in the shop's currency.
///
/// Backed by [`Decimal`] so that cart totals are exact. On the wire a price
/// is a plain JSON number, which is what the order service sends and expects.
///
/// ```
/// use frituur_core::Price;
///
/// let fries = Price::parse("2.50").unwrap();
/// let sauce = Price::parse("0.75").unwrap();
/// assert_eq!((fries + sauce).to_string(), "3.25");
/// assert!(Price::parse("0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// The zero amount, used as the total of an empty cart.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse a strictly positive price from user input.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Invalid`] if the input is not a decimal number and
    /// [`PriceError::NotPositive`] if it is zero or negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid)?;
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        Ok(Self(amount))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a quantity, used for grouped cart lines.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.0))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parse() {
        assert_eq!(Price::parse("2.5").unwrap(), Price::from_cents(250));
        assert_eq!(Price::parse("abc"), Err(PriceError::Invalid));
        assert_eq!(Price::parse("-1"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("0.00"), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_price_sum_is_exact() {
        let prices = [Price::from_cents(10), Price::from_cents(20)];
        let total: Price = prices.iter().sum();
        assert_eq!(total, Price::from_cents(30));
        assert_eq!(total.to_string(), "0.30");
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total: Price = core::iter::empty::<Price>().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn test_price_wire_format_is_number() {
        let price: Price = serde_json::from_str("3.75").unwrap();
        assert_eq!(price, Price::from_cents(375));
        let json = serde_json::to_value(price).unwrap();
        assert!(json.is_number());
    }

    #[test]
    fn test_price_times() {
        assert_eq!(Price::from_cents(125).times(3), Price::from_cents(375));
    }
}
