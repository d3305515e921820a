//! Minor-unit money representation.
//!
//! The MySwipe backend exchanges all amounts in minor units (satang for
//! THB). The dashboard's form inputs work in major units, so the
//! conversions here are the single place where rounding happens.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount in the smallest currency unit, paired with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in minor units (e.g., satang for THB).
    pub minor: i64,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

impl Money {
    /// Create a money value from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Create a money value from a major-unit amount, rounding half away
    /// from zero to the nearest minor unit.
    #[must_use]
    pub fn from_major(major: f64, currency: Currency) -> Self {
        Self {
            minor: to_minor(major),
            currency,
        }
    }

    /// The amount in major units.
    #[must_use]
    pub fn major(&self) -> f64 {
        to_major(self.minor)
    }

    /// Format for display (e.g., `฿1250.50`).
    #[must_use]
    pub fn display(&self) -> String {
        let amount = Decimal::new(self.minor, 2);
        format!("{}{:.2}", self.currency.symbol(), amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Convert a major-unit amount to minor units.
///
/// Non-finite inputs convert to zero, matching the forgiving number
/// coercion of the dashboard's form inputs.
#[must_use]
pub fn to_minor(major: f64) -> i64 {
    if !major.is_finite() {
        return 0;
    }
    let scaled = (major * 100.0).round();
    #[allow(clippy::cast_possible_truncation)] // prices are far below i64 range
    let minor = scaled as i64;
    minor
}

/// Convert minor units back to a major-unit amount.
#[must_use]
pub fn to_major(minor: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)] // prices are far below f64 precision
    let major = minor as f64;
    major / 100.0
}

/// ISO 4217 currency codes accepted by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    THB,
    USD,
}

impl Currency {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::THB => "\u{0e3f}",
            Self::USD => "$",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::THB => "THB",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_minor_rounds_to_nearest_satang() {
        assert_eq!(to_minor(10.006), 1001);
        assert_eq!(to_minor(10.004), 1000);
        assert_eq!(to_minor(123.45), 12345);
        assert_eq!(to_minor(0.0), 0);
    }

    #[test]
    fn to_minor_non_finite_is_zero() {
        assert_eq!(to_minor(f64::NAN), 0);
        assert_eq!(to_minor(f64::INFINITY), 0);
    }

    #[test]
    fn major_round_trips_whole_satang() {
        let money = Money::from_major(199.99, Currency::THB);
        assert_eq!(money.minor, 19999);
        assert!((money.major() - 199.99).abs() < f64::EPSILON);
    }

    #[test]
    fn display_uses_currency_symbol() {
        let money = Money::from_minor(125_050, Currency::THB);
        assert_eq!(money.display(), "\u{0e3f}1250.50");
    }
}
