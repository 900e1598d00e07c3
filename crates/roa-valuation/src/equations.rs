//! Real-options equations
//!
//! ```text
//! PV(X)       = X / (1 + rf)^t
//! valueToCost = normalize(S / PV(X), 0, 3.5)
//! volatility  = normalize(σ√t, 0, 7)
//! score       = valueToCost + volatility × valueToCost
//! ```
//!
//! Metrics are rounded to a fixed number of decimals after normalization.

use roa_core::{Bounds, DomainError};

/// Present value of the exercise cost: `cost / (1 + return_rate)^time`
///
/// Negative `time` (an overdue item) raises the effective cost.
///
/// # Errors
/// [`DomainError::NonPositiveDiscountBase`] when `1 + return_rate <= 0`.
pub fn present_value_of_x(cost: f64, return_rate: f64, time: i64) -> Result<f64, DomainError> {
    let base = 1.0 + return_rate;
    if base.is_nan() || base <= 0.0 {
        return Err(DomainError::NonPositiveDiscountBase { base });
    }
    Ok(cost / base.powf(time as f64))
}

/// Rescale `x` linearly so that `[min, max]` maps onto `[0, 2]`
#[inline]
#[must_use]
pub fn normalize(x: f64, min: f64, max: f64) -> f64 {
    (x - min) / (max - min) * 2.0
}

/// Inverse of [`normalize`]
#[inline]
#[must_use]
pub fn denormalize(y: f64, min: f64, max: f64) -> f64 {
    y / 2.0 * (max - min) + min
}

/// Round to `places` decimals, halves toward positive infinity
#[inline]
#[must_use]
pub fn round_to(x: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (x * factor + 0.5).floor() / factor
}

/// Normalized value-to-cost ratio of a requirement
///
/// # Errors
/// [`DomainError::NonPositiveDiscountBase`] from [`present_value_of_x`], or
/// [`DomainError::ZeroPresentValue`] when the discounted cost is zero.
pub fn value_to_cost(
    value: f64,
    cost: f64,
    return_rate: f64,
    time: i64,
    bounds: Bounds,
    places: u32,
) -> Result<f64, DomainError> {
    let pvx = present_value_of_x(cost, return_rate, time)?;
    if pvx == 0.0 {
        return Err(DomainError::ZeroPresentValue);
    }
    Ok(round_to(normalize(value / pvx, bounds.min, bounds.max), places))
}

/// Normalized volatility `σ√t`
///
/// # Errors
/// [`DomainError::NegativeTime`] when `time < 0`.
pub fn volatility(risk: f64, time: i64, bounds: Bounds, places: u32) -> Result<f64, DomainError> {
    if time < 0 {
        return Err(DomainError::NegativeTime { time });
    }
    let sigma_root_t = risk * (time as f64).sqrt();
    Ok(round_to(normalize(sigma_root_t, bounds.min, bounds.max), places))
}

/// Volatility-weighted value-to-cost
#[inline]
#[must_use]
pub fn score(value_to_cost: f64, volatility: f64) -> f64 {
    value_to_cost + volatility * value_to_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use roa_core::ValuationBounds;

    const EPS: f64 = 1e-9;

    fn vtc_bounds() -> Bounds {
        ValuationBounds::default().value_to_cost
    }

    fn vol_bounds() -> Bounds {
        ValuationBounds::default().volatility
    }

    #[test]
    fn present_value_discounts_over_time() {
        let pv = present_value_of_x(121.0, 0.1, 2).unwrap();
        assert!((pv - 100.0).abs() < EPS);
    }

    #[test]
    fn present_value_grows_when_overdue() {
        let pv = present_value_of_x(100.0, 0.1, -1).unwrap();
        assert!((pv - 110.0).abs() < EPS);
    }

    #[test]
    fn present_value_rejects_non_positive_base() {
        assert_eq!(
            present_value_of_x(10.0, -1.0, 2),
            Err(DomainError::NonPositiveDiscountBase { base: 0.0 })
        );
        assert!(present_value_of_x(10.0, -1.5, 2).is_err());
    }

    #[test]
    fn normalize_maps_bounds_to_zero_and_two() {
        assert_eq!(normalize(0.0, 0.0, 3.5), 0.0);
        assert_eq!(normalize(3.5, 0.0, 3.5), 2.0);
        assert_eq!(normalize(3.5, 0.0, 7.0), 1.0);
    }

    #[test]
    fn value_to_cost_known_value() {
        // pv = 4 / 1.1^0 = 4; 7 / 4 = 1.75; normalized = 1.0
        let vtc = value_to_cost(7.0, 4.0, 0.1, 0, vtc_bounds(), 3).unwrap();
        assert_eq!(vtc, 1.0);

        // pv = 3 / 1.05^2 = 2.7210884; 5 / pv = 1.8375; normalized = 1.05
        let vtc = value_to_cost(5.0, 3.0, 0.05, 2, vtc_bounds(), 3).unwrap();
        assert_eq!(vtc, 1.05);
    }

    #[test]
    fn value_to_cost_rejects_zero_cost() {
        assert_eq!(
            value_to_cost(5.0, 0.0, 0.1, 3, vtc_bounds(), 3),
            Err(DomainError::ZeroPresentValue)
        );
    }

    #[test]
    fn volatility_known_value() {
        // 3.5 * sqrt(4) = 7 -> normalized 2
        assert_eq!(volatility(3.5, 4, vol_bounds(), 3).unwrap(), 2.0);
        // 1 * sqrt(2) = 1.41421 -> 0.404061 -> 0.404
        assert_eq!(volatility(1.0, 2, vol_bounds(), 3).unwrap(), 0.404);
        assert_eq!(volatility(2.0, 0, vol_bounds(), 3).unwrap(), 0.0);
    }

    #[test]
    fn volatility_rejects_negative_time() {
        assert_eq!(
            volatility(1.0, -1, vol_bounds(), 3),
            Err(DomainError::NegativeTime { time: -1 })
        );
    }

    #[test]
    fn score_weights_by_volatility() {
        assert_eq!(score(1.0, 0.5), 1.5);
        assert_eq!(score(2.0, 0.0), 2.0);
        assert_eq!(score(0.0, 3.0), 0.0);
    }

    #[test]
    fn round_to_half_goes_up() {
        assert_eq!(round_to(0.0005, 3), 0.001);
        assert_eq!(round_to(1.23449, 3), 1.234);
        assert_eq!(round_to(-0.0005, 3), 0.0);
    }

    #[test]
    fn valuation_is_deterministic() {
        let a = value_to_cost(6.0, 4.0, 0.08, 3, vtc_bounds(), 3).unwrap();
        let b = value_to_cost(6.0, 4.0, 0.08, 3, vtc_bounds(), 3).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    proptest! {
        #[test]
        fn prop_normalize_inverts(x in -1.0e6..1.0e6f64, min in -100.0..100.0f64, width in 0.1..100.0f64) {
            let max = min + width;
            let back = denormalize(normalize(x, min, max), min, max);
            prop_assert!((back - x).abs() <= 1e-9 * x.abs().max(1.0));
        }

        #[test]
        fn prop_volatility_non_negative(risk in 0.0..50.0f64, time in 0..20i64) {
            let v = volatility(risk, time, vol_bounds(), 3).unwrap();
            prop_assert!(v >= 0.0);
        }
    }
}
