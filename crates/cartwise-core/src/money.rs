//! # Money Module
//!
//! Provides the `Money` type for prices, balances and fees.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Balance 1000.00, three purchases of 0.10 in floating point:            │
//! │    1000.0 - 0.1 - 0.1 - 0.1 = 999.6999999999999                         │
//! │                                                                         │
//! │  In cents:                                                              │
//! │    100000 - 10 - 10 - 10 = 99970                                        │
//! │                                                                         │
//! │  A balance comparison (balance < total) must never flip because of     │
//! │  representation error, so every amount is an i64 of cents.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartwise_core::money::Money;
//!
//! let price = Money::from_major(100);        // 100.00
//! let line = price.multiply_quantity(2);     // 200.00
//! let total = line + Money::from_cents(4000); // 240.00
//! assert_eq!(total.cents(), 24000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Single currency only; there is no currency code attached.
///
/// ```text
/// Product.unit_price ──► × quantity ──► line total ──► Cart.subtotal
///                                                          │
/// Cart.shipping_units × rate ──► shipping fee ─────────────┤
///                                                          ▼
///                              Customer.balance  ◄── total (balance -= total)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use cartwise_core::money::Money;
    ///
    /// let fee = Money::from_cents(1000);
    /// assert_eq!(fee.cents(), 1000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use cartwise_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(150).cents(), 15000);
    /// ```
    #[inline]
    pub const fn from_major(units: i64) -> Self {
        Money(units * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit amount by a quantity.
    ///
    /// ```rust
    /// use cartwise_core::money::Money;
    ///
    /// let unit_price = Money::from_major(100);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_major(200));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Like [`Money::multiply_quantity`], `None` on overflow.
    ///
    /// ```rust
    /// use cartwise_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(100).checked_multiply_quantity(2), Some(Money::from_major(200)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$D.CC`, with a leading `-` for negative amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a unit count (shipping fee, line totals).
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_major() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);

        assert_eq!(Money::from_major(490).cents(), 49000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_major(510).to_string(), "$510.00");
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 4u32).cents(), 4000);

        let mut balance = Money::from_major(1000);
        balance -= Money::from_major(440);
        assert_eq!(balance, Money::from_major(560));
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(big.checked_multiply_quantity(2), None);
        assert_eq!(big.checked_add(big), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);

        assert_eq!(
            Money::from_major(150).checked_add(Money::from_major(50)),
            Some(Money::from_major(200))
        );
        assert_eq!(
            Money::from_major(1000).checked_sub(Money::from_major(440)),
            Some(Money::from_major(560))
        );
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_major(200), Money::from_major(150), Money::from_major(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_major(400));

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_ordering_for_balance_check() {
        assert!(Money::from_cents(48999) < Money::from_major(490));
        assert!(Money::from_major(490) >= Money::from_major(490));
    }

    #[test]
    fn test_serde_is_transparent_cents() {
        let json = serde_json::to_string(&Money::from_cents(1234)).unwrap();
        assert_eq!(json, "1234");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cents(), 1234);
    }
}
