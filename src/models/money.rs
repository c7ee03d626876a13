//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Budget form fields are free text, so besides strict parsing this
//! type offers a total coercion that never fails.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest amount a coerced form field may hold: $10 trillion.
const MAX_COERCED_CENTS: i64 = 1_000_000_000_000_000;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use upscale_cli::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole dollars
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// The amount as a floating point dollar value (for chart geometry only)
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Coerce free-form input into a non-negative amount.
    ///
    /// Never fails: empty, unparsable, non-finite or negative input becomes
    /// zero. Accepts anything `f64` parses ("12", "12.5", "1e3") plus an
    /// optional leading `$`.
    ///
    /// ```
    /// use upscale_cli::models::Money;
    /// assert_eq!(Money::coerce("12.5").cents(), 1250);
    /// assert_eq!(Money::coerce("abc"), Money::zero());
    /// assert_eq!(Money::coerce("-4"), Money::zero());
    /// ```
    pub fn coerce(raw: &str) -> Self {
        let s = raw.trim();
        let s = s.strip_prefix('$').unwrap_or(s);
        if s.is_empty() {
            return Self::zero();
        }

        match s.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => {
                let cents = (value * 100.0).round() as i64;
                Self(cents.min(MAX_COERCED_CENTS))
            }
            _ => Self::zero(),
        }
    }

    /// Take `percent` percent of this amount, rounded to whole dollars.
    ///
    /// Halves round toward positive infinity.
    pub fn percent_rounded_to_dollar(&self, percent: i64) -> Self {
        // hundredths of a cent
        let scaled = self.0 * percent;
        let dollars = (scaled + 5_000).div_euclid(10_000);
        Self::from_dollars(dollars)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_coerce_valid_input() {
        assert_eq!(Money::coerce("700").cents(), 70_000);
        assert_eq!(Money::coerce(" 12.75 ").cents(), 1275);
        assert_eq!(Money::coerce("$40").cents(), 4000);
        assert_eq!(Money::coerce("1e3").cents(), 100_000);
    }

    #[test]
    fn test_coerce_is_total() {
        assert!(Money::coerce("").is_zero());
        assert!(Money::coerce("   ").is_zero());
        assert!(Money::coerce("twelve").is_zero());
        assert!(Money::coerce("NaN").is_zero());
        assert!(Money::coerce("inf").is_zero());
        assert!(Money::coerce("-25").is_zero());
        assert!(Money::coerce("1.€").is_zero());
        assert_eq!(Money::coerce("1e300").cents(), MAX_COERCED_CENTS);
    }

    #[test]
    fn test_percent_rounded_to_dollar() {
        let income = Money::from_dollars(1000);
        assert_eq!(income.percent_rounded_to_dollar(50), Money::from_dollars(500));
        assert_eq!(income.percent_rounded_to_dollar(30), Money::from_dollars(300));

        // 0.5 * $3 = $1.50 rounds up; 0.3 * $5 = $1.50 rounds up
        assert_eq!(Money::from_dollars(3).percent_rounded_to_dollar(50), Money::from_dollars(2));
        assert_eq!(Money::from_dollars(5).percent_rounded_to_dollar(30), Money::from_dollars(2));
        // 0.2 * $1.99 = $0.398 rounds down
        assert_eq!(Money::from_cents(199).percent_rounded_to_dollar(20), Money::zero());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
    }
}
