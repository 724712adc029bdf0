//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront API exchanges prices as plain JSON numbers (`49.9`), so
//! [`Price`] serializes through `f64` on the wire while keeping exact decimal
//! arithmetic in memory.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a quantity (line totals).
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_serializes_as_number() {
        let price = Price::from_cents(4990);
        assert_eq!(serde_json::to_string(&price).unwrap(), "49.9");
    }

    #[test]
    fn test_price_deserializes_from_number() {
        let price: Price = serde_json::from_str("129.5").unwrap();
        assert_eq!(price, Price::from_cents(12950));

        let whole: Price = serde_json::from_str("50").unwrap();
        assert_eq!(whole, Price::from_cents(5000));
    }

    #[test]
    fn test_price_display_two_decimals() {
        assert_eq!(Price::from_cents(4990).to_string(), "49.90");
        assert_eq!(Price::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_price_times_quantity() {
        assert_eq!(Price::from_cents(1250).times(3), Price::from_cents(3750));
    }
}
