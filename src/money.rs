//! Prices
//!
//! All cart and order arithmetic happens in integer minor units (cents);
//! decimal amounts only exist at the wire and presentation boundaries.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// A non-negative price in minor currency units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: u64,
}

impl Price {
    /// A zero price.
    pub const ZERO: Price = Price { cents: 0 };

    /// Creates a price from minor units.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Price { cents }
    }

    /// Returns the price in minor units.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Converts a decimal amount such as `8.99` into a price.
    ///
    /// Sub-cent precision is rounded half-away-from-zero to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns an error for negative amounts or amounts too large to
    /// represent in cents.
    pub fn from_decimal(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        let cents = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(PriceError::OutOfRange(amount))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        cents
            .to_u64()
            .map(Price::from_cents)
            .ok_or(PriceError::OutOfRange(amount))
    }

    /// Returns the decimal amount, e.g. `8.99` for 899 cents.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.cents) / Decimal::ONE_HUNDRED
    }

    /// Multiplies the price by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Price {
        Price::from_cents(self.cents.saturating_mul(u64::from(quantity)))
    }

    /// Adds two prices.
    #[must_use]
    pub fn plus(self, other: Price) -> Price {
        Price::from_cents(self.cents.saturating_add(other.cents))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize<'de>>::deserialize(deserializer)?;

        Price::from_decimal(amount).map_err(de::Error::custom)
    }
}

/// Errors converting decimal amounts into prices.
#[derive(Debug, Error)]
pub enum PriceError {
    /// The amount was negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),

    /// The amount does not fit in minor units.
    #[error("price out of range: {0}")]
    OutOfRange(Decimal),
}
