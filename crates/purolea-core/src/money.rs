//! # Money Module
//!
//! Provides the `Amount` type for monetary values in the quoting engine.
//!
//! ## Why Not Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SUB-CENT UNIT PRICES                                                   │
//! │                                                                         │
//! │  Formula is priced per ounce:   $0.035/oz × 8.5oz = $0.2975 per unit    │
//! │  Rounding to cents per unit, then × 10,000 units, drifts by dollars.    │
//! │                                                                         │
//! │  OUR SOLUTION: f64 end to end, rounded only for display                 │
//! │    per-unit components are summed exactly as computed                   │
//! │    totals are per-unit sum × quantity, nothing rounded in between       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Construction
//! Every `Amount` is finite and non-negative. Anything else (NaN, infinity,
//! negative numbers, unparsable text) collapses to zero, which is the
//! neutral element of the additive cost model.
//!
//! ```rust
//! use purolea_core::money::Amount;
//!
//! assert_eq!(Amount::new(-3.0), Amount::zero());
//! assert_eq!(Amount::parse_lenient("abc"), Amount::zero());
//! assert_eq!(Amount::parse_lenient(" 2.5 ").value(), 2.5);
//! assert_eq!(Amount::new(10575.0).to_string(), "$10,575.00");
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Amount Type
// =============================================================================

/// A non-negative, finite monetary value in US dollars.
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Amount is Used                                 │
/// │                                                                         │
/// │  Formula.price_per_oz ──┐                                               │
/// │  PackagingOption.price ─┼──► CostBreakdown per-unit ──► × quantity      │
/// │  Tier fees ─────────────┘            │                                  │
/// │                                      └──► Displayed as "$21.15"         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, TS)]
#[ts(export)]
pub struct Amount(f64);

impl Amount {
    /// Creates an amount, mapping non-finite or negative input to zero.
    #[inline]
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Amount(value)
        } else {
            Amount(0.0)
        }
    }

    /// Parses user-typed text, treating anything unparsable as zero.
    ///
    /// ## Example
    /// ```rust
    /// use purolea_core::money::Amount;
    ///
    /// assert_eq!(Amount::parse_lenient("1.50").value(), 1.5);
    /// assert_eq!(Amount::parse_lenient("").value(), 0.0);
    /// assert_eq!(Amount::parse_lenient("$1.50").value(), 0.0);
    /// ```
    pub fn parse_lenient(input: &str) -> Self {
        input
            .trim()
            .parse::<f64>()
            .map(Amount::new)
            .unwrap_or_default()
    }

    /// Zero dollars.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0.0)
    }

    /// Returns the raw value in dollars.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Multiplies a per-unit amount by a quantity.
    ///
    /// A product too large to represent collapses to zero like any other
    /// non-finite value.
    ///
    /// ## Example
    /// ```rust
    /// use purolea_core::money::Amount;
    ///
    /// let per_unit = Amount::new(3.00);
    /// assert_eq!(per_unit.times(500).value(), 1500.0);
    /// ```
    #[inline]
    pub fn times(&self, quantity: u32) -> Self {
        Amount::new(self.0 * f64::from(quantity))
    }

    /// Multiplies a per-ounce price by a size in ounces.
    #[inline]
    pub fn per_size(&self, size: Amount) -> Self {
        Amount::new(self.0 * size.0)
    }

    /// Rounds to whole cents (for display and comparisons only).
    #[inline]
    pub fn cents(&self) -> i64 {
        (self.0 * 100.0).round() as i64
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats a number with thousands separators and a fixed number of decimals.
///
/// ## Example
/// ```rust
/// use purolea_core::money::format_number;
///
/// assert_eq!(format_number(10575.0, 2), "10,575.00");
/// assert_eq!(format_number(8.0, 1), "8.0");
/// assert_eq!(format_number(1234567.891, 0), "1,234,568");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (whole, frac) = match raw.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match frac {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Display shows the amount as US currency, e.g. `$10,575.00`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", format_number(self.0, 2))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl Default for Amount {
    fn default() -> Self {
        Amount::zero()
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::new(value)
    }
}

/// Deserialization goes through [`Amount::new`] so stored garbage stays harmless.
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Amount::new)
    }
}

impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount::new(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<u32> for Amount {
    type Output = Self;

    #[inline]
    fn mul(self, quantity: u32) -> Self {
        self.times(quantity)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sanitizes() {
        assert_eq!(Amount::new(1.25).value(), 1.25);
        assert_eq!(Amount::new(-0.01).value(), 0.0);
        assert_eq!(Amount::new(f64::NAN).value(), 0.0);
        assert_eq!(Amount::new(f64::INFINITY).value(), 0.0);
        assert_eq!(Amount::new(-0.0).value().to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Amount::parse_lenient("2").value(), 2.0);
        assert_eq!(Amount::parse_lenient("0.75").value(), 0.75);
        assert!(Amount::parse_lenient("twelve").is_zero());
        assert!(Amount::parse_lenient("-4").is_zero());
        assert!(Amount::parse_lenient("NaN").is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(21.15).to_string(), "$21.15");
        assert_eq!(Amount::new(0.0).to_string(), "$0.00");
        assert_eq!(Amount::new(1500.0).to_string(), "$1,500.00");
        assert_eq!(Amount::new(1234567.5).to_string(), "$1,234,567.50");
        assert_eq!(Amount::new(0.005).to_string(), "$0.01");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-1234.5, 2), "-1,234.50");
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::new(16.0);
        let b = Amount::new(1.5);

        assert_eq!((a + b).value(), 17.5);
        assert_eq!((b * 4).value(), 6.0);

        let mut c = a;
        c += b;
        assert_eq!(c.value(), 17.5);

        let total: Amount = [a, b, Amount::new(3.0)].into_iter().sum();
        assert_eq!(total.value(), 20.5);
    }

    #[test]
    fn test_per_size_and_cents() {
        let per_oz = Amount::new(2.0);
        assert_eq!(per_oz.per_size(Amount::new(8.0)).value(), 16.0);
        assert_eq!(Amount::new(21.15).cents(), 2115);
    }

    #[test]
    fn test_overflow_stays_finite() {
        let huge = Amount::new(1e300);

        assert_eq!(huge.per_size(huge), Amount::zero());
        assert_eq!(Amount::new(f64::MAX).times(2), Amount::zero());
        assert_eq!(Amount::new(f64::MAX) + Amount::new(f64::MAX), Amount::zero());
        assert_eq!(huge.per_size(huge).to_string(), "$0.00");
    }

    #[test]
    fn test_serde_round_trip_sanitizes() {
        let json = serde_json::to_string(&Amount::new(1.5)).unwrap();
        assert_eq!(json, "1.5");

        let parsed: Amount = serde_json::from_str("-2.0").unwrap();
        assert!(parsed.is_zero());
    }
}
