//! # Money
//!
//! Every price in the studio is a whole number of cents.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stem prices summed as floats drift:                                    │
//! │    12.5 + 8.0 + 0.1 + 0.2 = 20.800000000000004                          │
//! │                                                                         │
//! │  As cents they don't:                                                   │
//! │    1250 + 800 + 10 + 20 = 2080                                          │
//! │                                                                         │
//! │  The one fractional step, segment multiplier × tier discount, goes     │
//! │  through `scale` as a single combined factor and is rounded once.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust
//! use petal_core::money::Money;
//!
//! let peony = Money::from_cents(1250);
//! assert_eq!((peony * 2).cents(), 2500);
//! assert_eq!(peony.scale(0.85).cents(), 1063); // 1062.5 rounds away from zero
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An amount in cents. Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// `from_major_minor(35, 50)` is $35.50. The sign of `major` applies to
    /// the whole amount.
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a fractional factor and rounds half away from zero to
    /// the nearest cent.
    ///
    /// ```rust
    /// use petal_core::money::Money;
    ///
    /// // Boutique (0.85) at the 20% tier
    /// let unit = Money::from_cents(1000).scale(0.85 * (1.0 - 0.20));
    /// assert_eq!(unit.cents(), 680);
    /// ```
    pub fn scale(&self, factor: f64) -> Money {
        Money((self.0 as f64 * factor).round() as i64)
    }
}

/// `$12.34`, for logs. The studio formats with its configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

/// Unit price × quantity. Exact.
impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, quantity: i64) -> Money {
        Money(self.0 * quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_minor() {
        assert_eq!(Money::from_major_minor(35, 50), Money::from_cents(3550));
        assert_eq!(Money::from_major_minor(-5, 50), Money::from_cents(-550));
        assert_eq!(Money::from_major_minor(0, 7), Money::from_cents(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(3550).to_string(), "$35.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1500).to_string(), "-$15.00");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_operators() {
        let peony = Money::from_cents(1250);
        let rose = Money::from_cents(800);

        assert_eq!(peony + rose, Money::from_cents(2050));
        assert_eq!(peony - rose, Money::from_cents(450));
        assert_eq!(rose * 60, Money::from_cents(48000));

        let mut running = Money::zero();
        running += peony;
        running += rose;
        assert_eq!(running, Money::from_cents(2050));
    }

    #[test]
    fn test_sum_of_stems() {
        let total: Money = [1250, 800, 1500].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 3550);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_scale_rounds_once() {
        assert_eq!(Money::from_cents(1250).scale(0.85).cents(), 1063);
        assert_eq!(Money::from_cents(1000).scale(0.85 * 0.8).cents(), 680);
        assert_eq!(Money::from_cents(1234).scale(1.0).cents(), 1234);
        assert_eq!(Money::from_cents(-1250).scale(0.85).cents(), -1063);
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Money::from_cents(2414)).unwrap(), "2414");
        let back: Money = serde_json::from_str("144840").unwrap();
        assert_eq!(back, Money::from_cents(144840));
    }
}
