//! Risk estimation by sampling
//!
//! A base magnitude is perturbed `samples` times. Each draw lands in the
//! 1σ, 2σ or 3σ band following the 68/95/99.7 rule, with σ set to 10% of
//! the base and an independently random sign. The estimate is the sample
//! standard deviation of the draws.

use rand::Rng;
use roa_core::DomainError;
use statrs::statistics::Statistics;

use crate::equations::round_to;

/// Fraction of the base magnitude used as one standard deviation
pub const STD_DEV_FRACTION: f64 = 0.1;

/// Band multiplier for a percentile drawn in `0..=100`
fn band(percentile: f64) -> f64 {
    if percentile <= 68.0 {
        1.0
    } else if percentile <= 95.0 {
        2.0
    } else {
        3.0
    }
}

/// Draw `samples` perturbations of `value`
pub fn normal_variations<R: Rng + ?Sized>(value: f64, samples: usize, rng: &mut R) -> Vec<f64> {
    let std_dev = value * STD_DEV_FRACTION;

    (0..samples)
        .map(|_| {
            let percentile = (rng.random::<f64>() * 100.0).round();
            let deviation = std_dev * band(percentile);
            let offset = rng.random::<f64>() * deviation;
            if rng.random_bool(0.5) {
                value + offset
            } else {
                value - offset
            }
        })
        .collect()
}

/// Estimate a risk magnitude for `value`
///
/// Non-deterministic unless `rng` is seeded.
///
/// # Errors
/// [`DomainError::NonFiniteRisk`] when `value` is not finite or fewer than
/// two samples are requested.
pub fn generate_risk<R: Rng + ?Sized>(
    value: f64,
    samples: usize,
    places: u32,
    rng: &mut R,
) -> Result<f64, DomainError> {
    if !value.is_finite() || samples < 2 {
        return Err(DomainError::NonFiniteRisk { base: value });
    }

    let variations = normal_variations(value, samples, rng);
    let std_dev = variations.iter().std_dev();
    if !std_dev.is_finite() {
        return Err(DomainError::NonFiniteRisk { base: value });
    }

    Ok(round_to(std_dev, places))
}
