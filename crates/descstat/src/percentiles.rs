use serde::Serialize;

/// Reasons a requested percentile cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PercentileError {
    #[display("percentile must be a finite number, got {_0}")]
    NotFinite(#[error(not(source))] f64),
    #[display("percentile {_0} is outside (0, 100]")]
    OutOfRange(#[error(not(source))] f64),
}

/// Converts a percentile argument into a fraction in `(0, 1]`.
///
/// Values strictly between 0 and 1 are taken as fractions already. Values in
/// `[1, 100]` are percentages, so `1` means 1% and not 100%.
///
/// # Examples
///
/// ```
/// use descstat::percentiles::{PercentileError, to_fraction};
///
/// assert_eq!(to_fraction(0.25), Ok(0.25));
/// assert_eq!(to_fraction(75.0), Ok(0.75));
/// assert_eq!(to_fraction(1.0), Ok(0.01));
/// assert_eq!(to_fraction(0.0), Err(PercentileError::OutOfRange(0.0)));
/// ```
pub fn to_fraction(percentile: f64) -> Result<f64, PercentileError> {
    if !percentile.is_finite() {
        return Err(PercentileError::NotFinite(percentile));
    }
    if 0.0 < percentile && percentile < 1.0 {
        Ok(percentile)
    } else if (1.0..=100.0).contains(&percentile) {
        Ok(percentile * 0.01)
    } else {
        Err(PercentileError::OutOfRange(percentile))
    }
}

/// Computes a single percentile value from sorted data.
///
/// This function interpolates linearly between the two order statistics
/// surrounding rank `(n - 1) * p`. When the rank falls exactly on an
/// element, or on the last element, that element is returned unchanged.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - A fraction in `(0, 1)` or a percentage in `[1, 100]`
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is
/// empty.
///
/// # Panics
///
/// Panics in debug mode if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// use descstat::percentiles::compute_percentile;
///
/// let values = [2.2, 3.4, 4.0, 4.0, 6.9, 7.0, 7.8];
///
/// assert_eq!(compute_percentile(&values, 50.0), Ok(4.0));
/// assert!((compute_percentile(&values, 0.25).unwrap() - 3.7).abs() < 1e-12);
/// assert!(compute_percentile(&values, 150.0).is_err());
/// ```
pub fn compute_percentile<T>(sorted_values: &[T], percentile: f64) -> Result<f64, PercentileError>
where
    T: Copy + PartialOrd + Into<f64>,
{
    let fraction = to_fraction(percentile)?;
    Ok(interpolate(sorted_values, fraction))
}

/// Like [`compute_percentile`], but returns `0.0` for an invalid percentile
/// instead of an error.
///
/// # Examples
///
/// ```
/// use descstat::percentiles::percentile_or_zero;
///
/// let values = [1.0, 2.0, 3.0];
/// assert_eq!(percentile_or_zero(&values, 50.0), 2.0);
/// assert_eq!(percentile_or_zero(&values, -5.0), 0.0);
/// ```
#[must_use]
pub fn percentile_or_zero<T>(sorted_values: &[T], percentile: f64) -> f64
where
    T: Copy + PartialOrd + Into<f64>,
{
    compute_percentile(sorted_values, percentile).unwrap_or(0.0)
}

#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
fn interpolate<T>(sorted_values: &[T], fraction: f64) -> f64
where
    T: Copy + PartialOrd + Into<f64>,
{
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );

    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let rank = last as f64 * fraction;
    let idx = rank.floor() as usize;
    let frac = rank - idx as f64;
    let lower: f64 = sorted_values[idx].into();
    if frac == 0.0 {
        return lower;
    }
    match sorted_values.get(idx + 1) {
        Some(&upper) => {
            let upper: f64 = upper.into();
            frac * (upper - lower) + lower
        }
        None => lower,
    }
}

/// The first, second and third quartiles of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    /// The 25th percentile.
    pub q1: f64,
    /// The 50th percentile, i.e. the median.
    pub q2: f64,
    /// The 75th percentile.
    pub q3: f64,
}

impl Quartiles {
    /// Computes the three quartiles of sorted values.
    ///
    /// Every quartile is `NaN` when the input is empty.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use descstat::percentiles::Quartiles;
    ///
    /// let q = Quartiles::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    /// assert_eq!((q.q1, q.q2, q.q3), (2.0, 3.0, 4.0));
    /// ```
    #[must_use]
    pub fn from_sorted<T>(sorted_values: &[T]) -> Self
    where
        T: Copy + PartialOrd + Into<f64>,
    {
        Self {
            q1: interpolate(sorted_values, 0.25),
            q2: interpolate(sorted_values, 0.50),
            q3: interpolate(sorted_values, 0.75),
        }
    }

    /// The median, which is the second quartile.
    #[must_use]
    pub fn median(&self) -> f64 {
        self.q2
    }

    /// The interquartile range, `Q3 - Q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Precomputed percentile values for a dataset.
///
/// This structure stores percentile-value pairs in the order they were
/// requested, for reporting arbitrary percentile points next to the
/// quartiles.
///
/// # Examples
///
/// ```
/// use descstat::percentiles::Percentiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let percentiles = Percentiles::from_sorted(&values, &[10.0, 0.5]).unwrap();
///
/// assert_eq!(percentiles.get(0.5), Some(3.0));
/// assert_eq!(percentiles.get(25.0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Percentiles {
    /// Each tuple contains (percentile as requested, value).
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted values.
    ///
    /// Fails on the first percentile point that is not a valid percentile.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted<T>(
        sorted_values: &[T],
        percentile_points: &[f64],
    ) -> Result<Self, PercentileError>
    where
        T: Copy + PartialOrd + Into<f64>,
    {
        let values = percentile_points
            .iter()
            .map(|&p| compute_percentile(sorted_values, p).map(|value| (p, value)))
            .collect::<Result<_, _>>()?;
        Ok(Self { values })
    }

    /// Gets the value at a specific percentile.
    ///
    /// Returns `None` if the percentile was not precomputed. The lookup uses
    /// the percentile exactly as it was requested, so `0.5` and `50.0` are
    /// different keys.
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values.iter().find_map(|(p, value)| {
            if (*p - percentile).abs() < f64::EPSILON {
                Some(*value)
            } else {
                None
            }
        })
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }

    /// Returns all percentile-value pairs as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.values
    }
}
