//! Value Objects for the storefront

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Order number value object, `KK-<year>-<6 digits>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn new(value: impl Into<String>) -> Result<Self, OrderNumberError> {
        let value = value.into().trim().to_string();
        if value.is_empty() { return Err(OrderNumberError::Empty); }
        Ok(Self(value))
    }

    /// Year of `now` plus the last six digits of its epoch milliseconds.
    /// Two orders in the same millisecond (or 1000 seconds apart) collide.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix = now.timestamp_millis().rem_euclid(1_000_000);
        Self(format!("KK-{:04}-{:06}", now.year(), suffix))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone)] pub enum OrderNumberError { Empty }
impl std::error::Error for OrderNumberError {}
impl fmt::Display for OrderNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Order number empty") }
}

/// Money value object. Every price in the shop is in Ghana cedis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const CURRENCY: &'static str = "GHS";
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self { Self(amount) }
    pub fn from_major(units: i64) -> Self { Self(Decimal::from(units)) }
    pub fn amount(&self) -> Decimal { self.0 }
    pub fn is_negative(&self) -> bool { self.0.is_sign_negative() && !self.0.is_zero() }
    /// Saturates at the largest representable amount instead of overflowing.
    pub fn multiply(&self, qty: Quantity) -> Money { Money(self.0.saturating_mul(Decimal::from(qty.value()))) }
}

impl Add for Money {
    type Output = Money;
    fn add(self, other: Money) -> Money { Money(self.0.saturating_add(other.0)) }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money { iter.fold(Money::ZERO, Add::add) }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "GH₵ {:.2}", self.0) }
}

/// Line-item quantity. Never below one, including when read back from storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    /// Clamps any requested amount, including zero and negatives, to `1..=u32::MAX`.
    pub fn at_least_one(requested: i64) -> Self {
        Self(requested.clamp(1, u32::MAX as i64) as u32)
    }

    pub fn value(&self) -> u32 { self.0 }
}

impl Default for Quantity { fn default() -> Self { Self::ONE } }
impl From<i64> for Quantity { fn from(requested: i64) -> Self { Self::at_least_one(requested) } }
impl From<Quantity> for u32 { fn from(qty: Quantity) -> Self { qty.0 } }
