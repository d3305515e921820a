//! Profit, margin, and deal-price derivation.
//!
//! All functions are pure over major-unit `f64` inputs (the form's entry
//! format); minor-unit conversion happens once, at payload-build time,
//! through [`myswipe_core::to_minor`].
//!
//! The deal controls are two-way bound: editing the discount percent
//! recomputes the displayed deal price, and editing the deal price
//! recomputes (and clamps) the percent. When the base price is zero or
//! non-finite there is no meaningful inverse, so the derived field stays
//! blank (`None`) rather than guessing a default.

use myswipe_core::to_minor;

/// Lowest accepted deal discount.
pub const MIN_DISCOUNT_PERCENT: u8 = 1;
/// Highest accepted deal discount.
pub const MAX_DISCOUNT_PERCENT: u8 = 90;
/// Percent pre-filled when deal mode is entered with no prior value.
pub const DEFAULT_DISCOUNT_PERCENT: u8 = 20;
/// Deals below this percent get a soft "may underperform" hint.
pub const SOFT_DISCOUNT_HINT_PERCENT: u8 = 20;

/// Profit per item: price minus cost, floored at zero.
#[must_use]
pub fn profit(price: f64, cost: f64) -> f64 {
    let price = if price.is_finite() { price } else { 0.0 };
    let cost = if cost.is_finite() { cost } else { 0.0 };
    (price - cost).max(0.0)
}

/// Profit margin in percent; zero when the price is not positive.
#[must_use]
pub fn margin(price: f64, cost: f64) -> f64 {
    if !price.is_finite() || price <= 0.0 {
        return 0.0;
    }
    profit(price, cost) / price * 100.0
}

/// Sale price for a discount percent, rounded to 2 decimals for display.
///
/// Returns `None` when the base price is zero or non-finite.
#[must_use]
pub fn deal_price(price: f64, percent: u8) -> Option<f64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }
    let raw = price * (1.0 - f64::from(percent) / 100.0);
    Some(round2(raw))
}

/// Invert a deal price back to a discount percent, clamped to the
/// accepted range.
///
/// Returns `None` when the base price is zero or non-finite, or the deal
/// price is non-finite - the derived field is left blank, not zeroed.
#[must_use]
pub fn discount_from_deal_price(price: f64, deal_price: f64) -> Option<u8> {
    if !price.is_finite() || price <= 0.0 || !deal_price.is_finite() {
        return None;
    }
    let raw = (1.0 - deal_price / price) * 100.0;
    let clamped = raw
        .round()
        .clamp(f64::from(MIN_DISCOUNT_PERCENT), f64::from(MAX_DISCOUNT_PERCENT));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 1..=90
    let percent = clamped as u8;
    Some(percent)
}

/// Sale price in minor units, floored at zero.
#[must_use]
pub fn deal_price_minor(price_minor: i64, percent: u8) -> i64 {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let discounted = (price_minor as f64 * (1.0 - f64::from(percent) / 100.0)).round() as i64;
    discounted.max(0)
}

/// Whether a discount percent is inside the accepted range.
#[must_use]
pub const fn valid_discount(percent: u8) -> bool {
    percent >= MIN_DISCOUNT_PERCENT && percent <= MAX_DISCOUNT_PERCENT
}

/// Convenience: the minor-unit deal price derived from a major-unit base
/// price, as sent to the deal endpoint.
#[must_use]
pub fn deal_price_minor_from_major(price: f64, percent: u8) -> i64 {
    deal_price_minor(to_minor(price), percent)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profit_and_margin_basics() {
        assert!((profit(150.0, 90.0) - 60.0).abs() < f64::EPSILON);
        assert!((margin(150.0, 90.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn profit_is_floored_at_zero() {
        assert!((profit(50.0, 90.0) - 0.0).abs() < f64::EPSILON);
        assert!((margin(50.0, 90.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn margin_of_zero_price_is_zero() {
        assert!((margin(0.0, 10.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deal_round_trip_is_idempotent() {
        // price 200 at 25% -> 150.00; 150 back -> 25%.
        let sale = deal_price(200.0, 25).expect("positive price");
        assert!((sale - 150.0).abs() < f64::EPSILON);
        assert_eq!(discount_from_deal_price(200.0, sale), Some(25));
    }

    #[test]
    fn deal_price_rounds_to_two_decimals() {
        // 99.99 at 33% = 66.9933 -> 66.99
        let sale = deal_price(99.99, 33).expect("positive price");
        assert!((sale - 66.99).abs() < 1e-9);
    }

    #[test]
    fn zero_deal_price_clamps_to_max_discount() {
        // Raw inverse is 100%, above the 90 cap.
        assert_eq!(discount_from_deal_price(200.0, 0.0), Some(90));
    }

    #[test]
    fn deal_price_above_base_clamps_to_min_discount() {
        assert_eq!(discount_from_deal_price(100.0, 150.0), Some(1));
    }

    #[test]
    fn no_derivation_when_price_is_zero_or_non_finite() {
        assert_eq!(deal_price(0.0, 20), None);
        assert_eq!(deal_price(f64::NAN, 20), None);
        assert_eq!(discount_from_deal_price(0.0, 10.0), None);
        assert_eq!(discount_from_deal_price(f64::INFINITY, 10.0), None);
        assert_eq!(discount_from_deal_price(100.0, f64::NAN), None);
    }

    #[test]
    fn discount_bounds() {
        assert!(!valid_discount(0));
        assert!(valid_discount(1));
        assert!(valid_discount(90));
        assert!(!valid_discount(91));
    }

    #[test]
    fn minor_unit_deal_price_floors_at_zero() {
        assert_eq!(deal_price_minor(20000, 25), 15000);
        assert_eq!(deal_price_minor(0, 90), 0);
        assert_eq!(deal_price_minor_from_major(199.99, 10), 17999);
    }
}
