//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues. The remote catalog reports prices as decimal JSON
//! numbers (`9.99`), so `Money` serializes to and from that form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

/// Display symbol for the store currency. The catalog prices in USD only.
pub const CURRENCY_SYMBOL: &str = "$";

/// A monetary value in US dollars.
///
/// Amounts are stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use shelf_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * 100.0).round() as i64)
    }

    /// Create a whole-dollar amount.
    pub const fn from_dollars(dollars: i64) -> Self {
        Self::new(dollars * 100)
    }

    /// Zero dollars.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        if self.is_negative() {
            format!("-{}{}", CURRENCY_SYMBOL, Money::new(-self.amount_cents).display_amount())
        } else {
            format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
        }
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.to_decimal())
    }

    /// Add another Money value, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor))
    }

    /// Multiply by a decimal factor (e.g., for percentages).
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        Money::new((self.amount_cents as f64 * factor).round() as i64)
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        self.multiply_decimal(percent / 100.0)
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("money amount must be finite"));
        }
        Ok(Money::from_decimal(amount))
    }
}
