//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64 cents) to avoid floating-point
//! drift in the allowance arithmetic. On the wire an amount is a plain decimal
//! number in major units (`250`, `12.5`), which is what exported payloads use.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Largest magnitude accepted when converting from a float, in cents
const MAX_WIRE_CENTS: f64 = 9.0e15;

/// Represents a monetary amount stored as hundredths of the currency unit
///
/// The currency itself is a display label held in the settings; the core math
/// never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted for a single expense or limit (one trillion units)
    ///
    /// Keeps a month of daily products and a ledger's worth of sums well inside
    /// `i64`; the operators below saturate rather than wrap past it.
    pub const MAX: Money = Money(100_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use spendguard::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether this amount is above [`Money::MAX`]
    pub const fn exceeds_max(&self) -> bool {
        self.0 > Self::MAX.0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// The given percentage of this amount, truncated to whole cents
    pub const fn percent(&self, percent: u8) -> Self {
        Self(self.0.saturating_mul(percent as i64) / 100)
    }

    /// Amount as a float in major units (display and CSV only)
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Convert a float in major units, rounding to the nearest cent
    pub fn from_f64(value: f64) -> Result<Self, MoneyParseError> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() > MAX_WIRE_CENTS {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }
        Ok(Self(cents as i64))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "10", "10.5". Digits beyond the
    /// second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, body) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        if body.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let cents = match body.split_once('.') {
            Some((whole, frac)) => {
                if frac.contains('.') || !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                let whole: i64 = if whole.is_empty() {
                    0
                } else {
                    whole.parse().map_err(|_| invalid())?
                };
                let frac: i64 = match frac.len() {
                    0 => 0,
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => frac[..2].parse().map_err(|_| invalid())?,
                };
                whole
                    .checked_mul(100)
                    .and_then(|c| c.checked_add(frac))
                    .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
            }
            None => body
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?,
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency label, e.g. "Rs. 250.00"
    pub fn format_with_label(&self, label: &str) -> String {
        if label.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", label, self)
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
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.units())
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireAmount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match WireAmount::deserialize(deserializer)? {
            WireAmount::Int(units) => units
                .checked_mul(100)
                .map(Money)
                .ok_or_else(|| MoneyParseError::OutOfRange(units.to_string())),
            WireAmount::Float(value) => Money::from_f64(value),
            WireAmount::Text(text) => Money::parse(&text),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_units(250).format_with_label("Rs."), "Rs. 250.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(10);
        let b = Money::from_units(5);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!((b * 3).cents(), 1500);
        assert_eq!(Money::from_units(500).percent(10), Money::from_units(50));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!(huge + huge, Money::from_cents(i64::MAX));
        assert_eq!(-huge - huge, Money::from_cents(i64::MIN));
        assert_eq!(huge * 30, Money::from_cents(i64::MAX));
        assert_eq!(huge.percent(100), Money::from_cents(i64::MAX / 100));

        let total: Money = [huge, huge, Money::from_units(1)].iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_max_amount() {
        assert!(!Money::MAX.exceeds_max());
        assert!((Money::MAX + Money::from_cents(1)).exceeds_max());
        assert!(Money::parse("50000000000000000").unwrap().exceeds_max());
        // A full month of maximum daily limits still fits
        assert!((Money::MAX * 31).cents() < i64::MAX);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.x").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Money::from_units(1), Money::from_units(2), Money::from_units(3)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_units(6));
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&Money::from_units(250)).unwrap(), "250");
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");

        let whole: Money = serde_json::from_str("250").unwrap();
        assert_eq!(whole, Money::from_units(250));
        let fractional: Money = serde_json::from_str("12.34").unwrap();
        assert_eq!(fractional, Money::from_cents(1234));
        let text: Money = serde_json::from_str("\"99.90\"").unwrap();
        assert_eq!(text, Money::from_cents(9990));

        assert!(serde_json::from_str::<Money>("true").is_err());
        assert!(serde_json::from_str::<Money>("1e300").is_err());
    }
}
