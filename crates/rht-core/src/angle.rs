//! Angle statistics on a half-polar axis (orientation modulo a half turn).
//!
//! `linear_mean` is what RHT matching has always used; the circular variants
//! are opt-in and take the period explicitly so they work for degrees and
//! radians alike.

use nalgebra::Vector2;
use std::f64::consts::TAU;

/// Plain arithmetic mean. NaN for an empty input.
pub fn linear_mean(angles: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = angles
        .into_iter()
        .fold((0.0f64, 0usize), |(s, n), a| (s + a, n + 1));
    sum / n as f64
}

/// Wrap an angle to `[0, period)`.
#[inline]
pub fn wrap_half(theta: f64, period: f64) -> f64 {
    let t = theta.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if t >= period {
        0.0
    } else {
        t
    }
}

/// Wrap a difference to `[-period/2, period/2)`.
#[inline]
pub fn wrap_difference(diff: f64, period: f64) -> f64 {
    let half = 0.5 * period;
    wrap_half(diff + half, period) - half
}

/// Mean orientation of `angles` with period `period`, in `[0, period)`.
///
/// Accumulates unit vectors in doubled-angle space so that `θ` and
/// `θ + period` vote for the same direction. Returns NaN for an empty input
/// or when the votes cancel out.
pub fn circular_mean_half(angles: impl IntoIterator<Item = f64>, period: f64) -> f64 {
    let scale = TAU / period;
    let mut sum = Vector2::<f64>::zeros();
    let mut n = 0usize;
    for theta in angles {
        let phi = theta * scale;
        sum += Vector2::new(phi.cos(), phi.sin());
        n += 1;
    }
    if n == 0 {
        return f64::NAN;
    }

    let mean = sum / n as f64;
    if mean.norm_squared() < 1e-12 {
        return f64::NAN;
    }
    wrap_half(mean.y.atan2(mean.x) / scale, period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn linear_mean_of_empty_is_nan() {
        assert!(linear_mean(std::iter::empty()).is_nan());
        assert_abs_diff_eq!(linear_mean([45.0, 135.0]), 90.0);
    }

    #[test]
    fn wrap_half_handles_negative_and_overflow() {
        assert_abs_diff_eq!(wrap_half(-10.0, 180.0), 170.0);
        assert_abs_diff_eq!(wrap_half(190.0, 180.0), 10.0);
        assert_abs_diff_eq!(wrap_half(-PI / 4.0, PI), 3.0 * PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn wrap_difference_is_centered() {
        assert_abs_diff_eq!(wrap_difference(170.0, 180.0), -10.0);
        assert_abs_diff_eq!(wrap_difference(-170.0, 180.0), 10.0);
        assert_abs_diff_eq!(wrap_difference(45.0, 180.0), 45.0);
        assert_abs_diff_eq!(wrap_difference(90.0, 180.0), -90.0);
    }

    #[test]
    fn circular_mean_bridges_wrap() {
        // 175 and 5 degrees straddle the wrap; the linear mean says 90.
        let m = circular_mean_half([175.0, 5.0], 180.0);
        assert!(m < 1e-9 || (180.0 - m) < 1e-9, "got {m}");
        assert_abs_diff_eq!(linear_mean([175.0, 5.0]), 90.0);
    }

    #[test]
    fn circular_mean_matches_linear_away_from_wrap() {
        assert_abs_diff_eq!(circular_mean_half([40.0, 50.0], 180.0), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn circular_mean_of_opposed_votes_is_nan() {
        assert!(circular_mean_half([0.0, 90.0], 180.0).is_nan());
        assert!(circular_mean_half(std::iter::empty(), 180.0).is_nan());
    }
}
