//! Numeric helpers shared by the dimension functions.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Upper bound of every dimension and of the overall score.
pub const SCORE_MAX: f64 = 5.0;

/// Clamp a dimension value into [0, 5].
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, SCORE_MAX)
}

/// Places kept before the final rounding. Binary float noise sits far
/// below this, so a sum such as 2.3449999999999998 is treated as 2.345.
const SNAP_DECIMALS: u32 = 9;

/// Round half-up to `decimals` places.
///
/// Rounding runs on a [`Decimal`] so that ties written in decimal round
/// up even when their binary form lies just below. 2.345 → 2.35.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let Some(exact) = Decimal::from_f64(value) else {
        return value;
    };
    exact
        .round_dp(SNAP_DECIMALS)
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(value)
}

/// Σ(component × weight), unrounded.
pub fn weighted_sum(components: &[f64; 5], weights: &[f64; 5]) -> f64 {
    components
        .iter()
        .zip(weights.iter())
        .map(|(n, w)| n * w)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_not_half_even() {
        assert_eq!(round_half_up(0.125, 2), 0.13);
        assert_eq!(round_half_up(3.575, 2), 3.58);
        assert_eq!(round_half_up(2.004, 2), 2.0);
    }

    #[test]
    fn test_round_half_up_on_float_ties() {
        // Each sum is a decimal tie whose nearest f64 lies just below it.
        let cases = [
            (2.2 * 0.25 + 2.0 * 0.2 + 4.0 * 0.2 + 2.0 * 0.2 + 1.3 * 0.15, 2.35),
            (2.2 * 0.25 + 2.0 * 0.2 + 3.5 * 0.2 + 2.0 * 0.2 + 1.3 * 0.15, 2.25),
            (2.345, 2.35),
            (2.405, 2.41),
            (1.005, 1.01),
        ];
        for (sum, expected) in cases {
            assert_eq!(round_half_up(sum, 2), expected, "sum {sum:?}");
        }
    }

    #[test]
    fn test_round_half_up_keeps_non_ties() {
        assert_eq!(round_half_up(2.3449, 2), 2.34);
        assert_eq!(round_half_up(4.0, 2), 4.0);
        assert_eq!(round_half_up(0.0, 2), 0.0);
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp_score(-1.0), 0.0);
        assert_eq!(clamp_score(6.2), 5.0);
        assert_eq!(clamp_score(3.3), 3.3);
    }

    #[test]
    fn test_weighted_sum() {
        let components = [5.0, 3.0, 4.0, 2.0, 3.5];
        let weights = [0.25, 0.20, 0.20, 0.20, 0.15];
        assert!((weighted_sum(&components, &weights) - 3.575).abs() < 1e-9);
    }
}
