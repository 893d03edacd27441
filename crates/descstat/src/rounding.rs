//! Decimal rounding applied to every derived statistic.

/// Significant digits kept when absorbing binary representation error
/// before the final rounding step.
const PRE_ROUND_DIGITS: i32 = 15;

/// Rounds `value` to `precision` decimal digits, half away from zero.
///
/// A negative `precision` rounds to tens, hundreds, and so on. Non-finite
/// values are returned unchanged.
///
/// The scaled value is first rounded to 15 significant digits so that
/// decimal literals which are not exactly representable round the way they
/// read, e.g. `1.005` rounds up to `1.01`.
///
/// # Examples
///
/// ```
/// use descstat::rounding::round_to;
///
/// assert_eq!(round_to(35.3 / 7.0, 2), 5.04);
/// assert_eq!(round_to(1.005, 2), 1.01);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// assert_eq!(round_to(1234.0, -2), 1200.0);
/// ```
#[must_use]
pub fn round_to(value: f64, precision: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(precision.abs());
    let scaled = if precision >= 0 {
        value * factor
    } else {
        value / factor
    };
    if !scaled.is_finite() {
        return value;
    }
    let rounded = pre_round(scaled).round();
    let result = if precision >= 0 {
        rounded / factor
    } else {
        rounded * factor
    };
    if result.is_finite() { result } else { value }
}

/// Rounds every element of `values` with [`round_to`].
#[must_use]
pub fn round_all<I>(values: I, precision: i32) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .map(|v| round_to(v, precision))
        .collect()
}

#[expect(clippy::cast_possible_truncation)]
fn pre_round(scaled: f64) -> f64 {
    if scaled == 0.0 {
        return scaled;
    }
    let magnitude = scaled.abs().log10().floor() as i32;
    let digits = PRE_ROUND_DIGITS - 1 - magnitude;
    if digits <= 0 {
        // Already integral at this magnitude
        return scaled;
    }
    let factor = 10f64.powi(digits);
    let pre = (scaled * factor).round() / factor;
    if pre.is_finite() { pre } else { scaled }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_positive_precision() {
        assert_eq!(round_to(5.042_857_142_857_143, 2), 5.04);
        assert_eq!(round_to(3.977_142_857_142_857, 2), 3.98);
        assert_eq!(round_to(0.142_857_142_857_142_85, 2), 0.14);
        assert_eq!(round_to(2.345, 1), 2.3);
        assert_eq!(round_to(2.35, 1), 2.4);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(0.5, 0), 1.0);
        assert_eq!(round_to(-0.5, 0), -1.0);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-1.005, 2), -1.01);
    }

    #[test]
    fn test_round_negative_precision() {
        assert_eq!(round_to(1250.0, -2), 1300.0);
        assert_eq!(round_to(-1249.0, -2), -1200.0);
        assert_eq!(round_to(7.0, -1), 10.0);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
        assert_eq!(round_to(f64::NEG_INFINITY, 2), f64::NEG_INFINITY);
    }

    #[test]
    fn test_huge_values_are_left_alone() {
        assert_eq!(round_to(1e300, 10), 1e300);
        assert_eq!(round_to(f64::MAX, 2), f64::MAX);
    }

    #[test]
    fn test_round_all() {
        assert_eq!(
            round_all([1.234, 5.678, -0.004], 2),
            vec![1.23, 5.68, -0.0]
        );
    }
}
