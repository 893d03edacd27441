use crate::{
    config::{DEFAULT_PRECISION, EngineConfig},
    dataset::Dataset,
    frequency::{self, FrequencyTable},
    percentiles::{self, PercentileError, Percentiles, Quartiles},
    rounding::{round_all, round_to},
    score::Score,
};

/// Divisor used by variance and standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum VarianceKind {
    /// Divide by the population size.
    Population,
    /// Divide by the sample size (population size minus one).
    Sample,
}

/// Distance of every score from the mean, plain or squared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum DeviationKind {
    /// `x - mean`
    Plain,
    /// `(x - mean)²`
    Squared,
}

#[derive(Debug, Clone, Default)]
struct Cache {
    quartiles: Option<Quartiles>,
    mean: Option<f64>,
    median: Option<f64>,
    mode: Option<f64>,
    max: Option<f64>,
    min: Option<f64>,
    range: Option<f64>,
    iqr: Option<f64>,
    deviations: Option<Vec<f64>>,
    squared_deviations: Option<Vec<f64>>,
    population_variance: Option<f64>,
    sample_variance: Option<f64>,
    population_std_dev: Option<f64>,
    sample_std_dev: Option<f64>,
    fx: Option<Vec<f64>>,
    relative_frequency: Option<Vec<f64>>,
    relative_frequency_percent: Option<Vec<f64>>,
    cumulative_frequency: Option<Vec<usize>>,
}

impl Cache {
    fn deviations_mut(&mut self, kind: DeviationKind) -> &mut Option<Vec<f64>> {
        match kind {
            DeviationKind::Plain => &mut self.deviations,
            DeviationKind::Squared => &mut self.squared_deviations,
        }
    }

    fn variance_mut(&mut self, kind: VarianceKind) -> &mut Option<f64> {
        match kind {
            VarianceKind::Population => &mut self.population_variance,
            VarianceKind::Sample => &mut self.sample_variance,
        }
    }

    fn std_dev_mut(&mut self, kind: VarianceKind) -> &mut Option<f64> {
        match kind {
            VarianceKind::Population => &mut self.population_std_dev,
            VarianceKind::Sample => &mut self.sample_std_dev,
        }
    }
}

/// Descriptive statistics over a cleaned one-dimensional dataset.
///
/// The dataset and its frequency table are fixed at construction. Every
/// other statistic is computed on request by a `find_*` or `calculate_*`
/// method, which returns the fresh value and caches it. Methods that need
/// another statistic compute it first when it is not cached yet. The
/// matching accessor without prefix returns the cached value, or `None` if
/// it was never computed.
///
/// Derived values are rounded to the engine's precision. Quartiles, the
/// median, the mode and the extremes are taken from the data and are not
/// rounded, and neither are the range and IQR computed from them.
///
/// An empty dataset is accepted; statistics that divide by the population
/// size are then NaN. Sample statistics of a single value divide by zero
/// and are likewise not finite.
///
/// # Examples
///
/// ```
/// use descstat::engine::{StatisticsEngine, VarianceKind};
///
/// let mut stats = StatisticsEngine::new([7.0, 3.4, 4.0, 6.9, 4.0, 2.2, 7.8]);
///
/// assert_eq!(stats.mean(), None);
/// assert_eq!(stats.find_mean(), 5.04);
/// assert_eq!(stats.mean(), Some(5.04));
///
/// assert_eq!(stats.find_mode(), 4.0);
/// assert!((stats.find_range() - 5.6).abs() < 1e-12);
/// assert_eq!(stats.find_std_dev(VarianceKind::Sample), 2.15);
/// ```
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    precision: i32,
    dataset: Dataset,
    frequency: FrequencyTable,
    cache: Cache,
}

impl StatisticsEngine {
    /// Cleans `values` and rounds to two decimal digits.
    #[must_use]
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        Self::with_precision(values, DEFAULT_PRECISION)
    }

    /// Cleans `values` and rounds to `precision` decimal digits.
    #[must_use]
    pub fn with_precision<I, T>(values: I, precision: i32) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        Self::from_dataset(Dataset::new(values), precision)
    }

    /// Cleans `values` using the settings in `config`.
    #[must_use]
    pub fn with_config<I, T>(values: I, config: &EngineConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        Self::with_precision(values, config.precision)
    }

    /// Builds an engine over an already cleaned dataset.
    #[must_use]
    pub fn from_dataset(dataset: Dataset, precision: i32) -> Self {
        let frequency = FrequencyTable::from_sorted(dataset.scores());
        log::debug!(
            "dataset has {} values, {} distinct",
            dataset.len(),
            frequency.len()
        );
        Self {
            precision,
            dataset,
            frequency,
            cache: Cache::default(),
        }
    }

    #[must_use]
    pub fn precision(&self) -> i32 {
        self.precision
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The cleaned scores in ascending order.
    #[must_use]
    pub fn scores(&self) -> &[Score] {
        self.dataset.scores()
    }

    #[must_use]
    pub fn frequency(&self) -> &FrequencyTable {
        &self.frequency
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.dataset.population_size()
    }

    #[must_use]
    pub fn sample_size(&self) -> i64 {
        self.dataset.sample_size()
    }

    /// The value at an arbitrary percentile of the dataset.
    ///
    /// `percentile` is a fraction in `(0, 1)` or a percentage in `[1, 100]`.
    /// The result is not cached.
    pub fn percentile(&self, percentile: f64) -> Result<f64, PercentileError> {
        percentiles::compute_percentile(self.dataset.scores(), percentile)
    }

    /// The values at several percentiles of the dataset.
    pub fn percentiles(&self, percentile_points: &[f64]) -> Result<Percentiles, PercentileError> {
        Percentiles::from_sorted(self.dataset.scores(), percentile_points)
    }

    pub fn find_quartiles(&mut self) -> Quartiles {
        let quartiles = Quartiles::from_sorted(self.dataset.scores());
        log::trace!("quartiles: {quartiles:?}");
        self.cache.quartiles = Some(quartiles);
        quartiles
    }

    #[must_use]
    pub fn quartiles(&self) -> Option<Quartiles> {
        self.cache.quartiles
    }

    fn quartiles_or_find(&mut self) -> Quartiles {
        match self.cache.quartiles {
            Some(quartiles) => quartiles,
            None => self.find_quartiles(),
        }
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn find_mean(&mut self) -> f64 {
        let total = self.dataset.values().sum::<f64>();
        let mean = round_to(total / self.population_size() as f64, self.precision);
        self.cache.mean = Some(mean);
        mean
    }

    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        self.cache.mean
    }

    fn mean_or_find(&mut self) -> f64 {
        match self.cache.mean {
            Some(mean) => mean,
            None => self.find_mean(),
        }
    }

    /// The second quartile.
    pub fn find_median(&mut self) -> f64 {
        let median = self.quartiles_or_find().median();
        self.cache.median = Some(median);
        median
    }

    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.cache.median
    }

    /// The most frequent value; ties go to the lowest value.
    pub fn find_mode(&mut self) -> f64 {
        let mode = self.frequency.mode().map_or(f64::NAN, Score::get);
        self.cache.mode = Some(mode);
        mode
    }

    #[must_use]
    pub fn mode(&self) -> Option<f64> {
        self.cache.mode
    }

    pub fn find_max(&mut self) -> f64 {
        let max = self.dataset.max().map_or(f64::NAN, Score::get);
        self.cache.max = Some(max);
        max
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.cache.max
    }

    pub fn find_min(&mut self) -> f64 {
        let min = self.dataset.min().map_or(f64::NAN, Score::get);
        self.cache.min = Some(min);
        min
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.cache.min
    }

    /// `max - min`.
    pub fn find_range(&mut self) -> f64 {
        let max = match self.cache.max {
            Some(max) => max,
            None => self.find_max(),
        };
        let min = match self.cache.min {
            Some(min) => min,
            None => self.find_min(),
        };
        let range = max - min;
        self.cache.range = Some(range);
        range
    }

    #[must_use]
    pub fn range(&self) -> Option<f64> {
        self.cache.range
    }

    /// `Q3 - Q1`.
    pub fn find_iqr(&mut self) -> f64 {
        let iqr = self.quartiles_or_find().iqr();
        self.cache.iqr = Some(iqr);
        iqr
    }

    #[must_use]
    pub fn iqr(&self) -> Option<f64> {
        self.cache.iqr
    }

    /// Distance of every score from the mean, each rounded, in dataset order.
    pub fn calculate_deviations(&mut self, kind: DeviationKind) -> &[f64] {
        let mean = self.mean_or_find();
        let deviations = round_all(
            self.dataset.values().map(|x| {
                let d = x - mean;
                if kind.is_squared() { d * d } else { d }
            }),
            self.precision,
        );
        self.cache.deviations_mut(kind).insert(deviations)
    }

    #[must_use]
    pub fn deviations(&self, kind: DeviationKind) -> Option<&[f64]> {
        match kind {
            DeviationKind::Plain => self.cache.deviations.as_deref(),
            DeviationKind::Squared => self.cache.squared_deviations.as_deref(),
        }
    }

    /// Sum of squared deviations divided by the population or sample size,
    /// rounded.
    #[expect(clippy::cast_precision_loss)]
    pub fn find_variance(&mut self, kind: VarianceKind) -> f64 {
        if self.cache.squared_deviations.is_none() {
            self.calculate_deviations(DeviationKind::Squared);
        }
        let sum = self
            .cache
            .squared_deviations
            .as_deref()
            .unwrap_or_default()
            .iter()
            .sum::<f64>();
        let n = match kind {
            VarianceKind::Population => self.population_size() as f64,
            VarianceKind::Sample => self.sample_size() as f64,
        };
        let variance = round_to(sum / n, self.precision);
        log::trace!("{kind:?} variance: {variance}");
        *self.cache.variance_mut(kind) = Some(variance);
        variance
    }

    #[must_use]
    pub fn variance(&self, kind: VarianceKind) -> Option<f64> {
        match kind {
            VarianceKind::Population => self.cache.population_variance,
            VarianceKind::Sample => self.cache.sample_variance,
        }
    }

    /// Square root of the matching variance, rounded.
    pub fn find_std_dev(&mut self, kind: VarianceKind) -> f64 {
        let variance = match self.variance(kind) {
            Some(variance) => variance,
            None => self.find_variance(kind),
        };
        let std_dev = round_to(variance.sqrt(), self.precision);
        *self.cache.std_dev_mut(kind) = Some(std_dev);
        std_dev
    }

    #[must_use]
    pub fn std_dev(&self, kind: VarianceKind) -> Option<f64> {
        match kind {
            VarianceKind::Population => self.cache.population_std_dev,
            VarianceKind::Sample => self.cache.sample_std_dev,
        }
    }

    /// `value * frequency(value)` for every score, in dataset order.
    pub fn calculate_fx(&mut self) -> &[f64] {
        let fx = self.frequency.fx(self.dataset.scores(), self.precision);
        self.cache.fx.insert(fx)
    }

    #[must_use]
    pub fn fx(&self) -> Option<&[f64]> {
        self.cache.fx.as_deref()
    }

    /// Relative frequency of every distinct value, in ascending value order.
    pub fn calculate_relative_frequency(&mut self) -> &[f64] {
        let relative = self.frequency.relative(self.precision);
        self.cache.relative_frequency.insert(relative)
    }

    #[must_use]
    pub fn relative_frequency(&self) -> Option<&[f64]> {
        self.cache.relative_frequency.as_deref()
    }

    /// Relative frequencies as percentages, in ascending value order.
    pub fn calculate_relative_frequency_percent(&mut self) -> &[f64] {
        if self.cache.relative_frequency.is_none() {
            self.calculate_relative_frequency();
        }
        let relative = self.cache.relative_frequency.as_deref().unwrap_or_default();
        let percent = frequency::to_percent(relative, self.precision);
        self.cache.relative_frequency_percent.insert(percent)
    }

    #[must_use]
    pub fn relative_frequency_percent(&self) -> Option<&[f64]> {
        self.cache.relative_frequency_percent.as_deref()
    }

    /// Running total of the counts, in ascending value order.
    pub fn calculate_cumulative_frequency(&mut self) -> &[usize] {
        let cumulative = self.frequency.cumulative();
        self.cache.cumulative_frequency.insert(cumulative)
    }

    #[must_use]
    pub fn cumulative_frequency(&self) -> Option<&[usize]> {
        self.cache.cumulative_frequency.as_deref()
    }
}

impl FromIterator<f64> for StatisticsEngine {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn sample() -> StatisticsEngine {
        StatisticsEngine::new([7.0, 3.4, 4.0, 6.9, 4.0, 2.2, 7.8])
    }

    #[test]
    fn test_sizes_and_frequency() {
        let stats = sample();
        assert_eq!(stats.population_size(), 7);
        assert_eq!(stats.sample_size(), 6);
        assert_eq!(stats.precision(), 2);
        assert_eq!(
            stats.scores().iter().map(|s| s.get()).collect::<Vec<_>>(),
            vec![2.2, 3.4, 4.0, 4.0, 6.9, 7.0, 7.8]
        );
        assert_eq!(stats.frequency().get(4.0), Some(2));
        assert_eq!(stats.frequency().total(), 7);
    }

    #[test]
    fn test_central_tendency() {
        let mut stats = sample();
        assert_eq!(stats.find_mean(), 5.04);
        assert_eq!(stats.find_median(), 4.0);
        assert_eq!(stats.find_mode(), 4.0);
    }

    #[test]
    fn test_quartiles_and_dispersion() {
        let mut stats = sample();
        let q = stats.find_quartiles();
        assert_abs_diff_eq!(q.q1, 3.7, epsilon = 1e-12);
        assert_eq!(q.q2, 4.0);
        assert_abs_diff_eq!(q.q3, 6.95, epsilon = 1e-12);
        assert_eq!(stats.find_max(), 7.8);
        assert_eq!(stats.find_min(), 2.2);
        assert_abs_diff_eq!(stats.find_range(), 5.6, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.find_iqr(), 3.25, epsilon = 1e-12);
    }

    #[test]
    fn test_deviations() {
        let mut stats = sample();
        assert_eq!(
            stats.calculate_deviations(DeviationKind::Plain),
            &[-2.84, -1.64, -1.04, -1.04, 1.86, 1.96, 2.76]
        );
        assert_eq!(
            stats.calculate_deviations(DeviationKind::Squared),
            &[8.07, 2.69, 1.08, 1.08, 3.46, 3.84, 7.62]
        );
    }

    #[test]
    fn test_variance_and_std_dev() {
        let mut stats = sample();
        assert_eq!(stats.find_variance(VarianceKind::Population), 3.98);
        assert_eq!(stats.find_variance(VarianceKind::Sample), 4.64);
        assert_eq!(stats.find_std_dev(VarianceKind::Population), 1.99);
        assert_eq!(stats.find_std_dev(VarianceKind::Sample), 2.15);
    }

    #[test]
    fn test_frequency_distributions() {
        let mut stats = sample();
        assert_eq!(
            stats.calculate_relative_frequency(),
            &[0.14, 0.14, 0.29, 0.14, 0.14, 0.14]
        );
        assert_eq!(
            stats.calculate_relative_frequency_percent(),
            &[14.0, 14.0, 29.0, 14.0, 14.0, 14.0]
        );
        assert_eq!(stats.calculate_cumulative_frequency(), &[1, 2, 4, 5, 6, 7]);
        assert_eq!(
            stats.calculate_fx(),
            &[2.2, 3.4, 8.0, 8.0, 6.9, 7.0, 7.8]
        );
    }

    #[test]
    fn test_accessors_empty_until_computed() {
        let stats = sample();
        assert_eq!(stats.quartiles(), None);
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.median(), None);
        assert_eq!(stats.mode(), None);
        assert_eq!(stats.max(), None);
        assert_eq!(stats.min(), None);
        assert_eq!(stats.range(), None);
        assert_eq!(stats.iqr(), None);
        assert_eq!(stats.deviations(DeviationKind::Plain), None);
        assert_eq!(stats.deviations(DeviationKind::Squared), None);
        assert_eq!(stats.variance(VarianceKind::Population), None);
        assert_eq!(stats.std_dev(VarianceKind::Sample), None);
        assert_eq!(stats.fx(), None);
        assert_eq!(stats.relative_frequency(), None);
        assert_eq!(stats.relative_frequency_percent(), None);
        assert_eq!(stats.cumulative_frequency(), None);
    }

    #[test]
    fn test_prerequisites_are_cached() {
        let mut stats = sample();
        stats.find_std_dev(VarianceKind::Sample);
        assert_eq!(stats.mean(), Some(5.04));
        assert!(stats.deviations(DeviationKind::Squared).is_some());
        assert_eq!(stats.deviations(DeviationKind::Plain), None);
        assert_eq!(stats.variance(VarianceKind::Sample), Some(4.64));
        assert_eq!(stats.variance(VarianceKind::Population), None);

        stats.find_iqr();
        assert!(stats.quartiles().is_some());
        assert_eq!(stats.median(), None);

        stats.find_range();
        assert_eq!(stats.max(), Some(7.8));
        assert_eq!(stats.min(), Some(2.2));

        stats.calculate_relative_frequency_percent();
        assert!(stats.relative_frequency().is_some());
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let mut stats = sample();
        assert_eq!(stats.find_mean(), stats.find_mean());
        assert_eq!(stats.find_quartiles(), stats.find_quartiles());
        assert_eq!(
            stats.find_variance(VarianceKind::Sample),
            stats.find_variance(VarianceKind::Sample)
        );
        let first = stats.calculate_cumulative_frequency().to_vec();
        assert_eq!(stats.calculate_cumulative_frequency(), first.as_slice());
        let first = stats.calculate_fx().to_vec();
        assert_eq!(stats.calculate_fx(), first.as_slice());
    }

    #[test]
    fn test_precision() {
        let mut stats = StatisticsEngine::with_precision([7.0, 3.4, 4.0, 6.9, 4.0, 2.2, 7.8], 0);
        assert_eq!(stats.find_mean(), 5.0);

        let config = EngineConfig { precision: 3 };
        let mut stats = StatisticsEngine::with_config([7.0, 3.4, 4.0, 6.9, 4.0, 2.2, 7.8], &config);
        assert_eq!(stats.precision(), 3);
        assert_eq!(stats.find_mean(), 5.043);
    }

    #[test]
    fn test_range_and_iqr_ignore_precision() {
        let mut stats = StatisticsEngine::with_precision([7.0, 3.4, 4.0, 6.9, 4.0, 2.2, 7.8], 0);
        let q = stats.find_quartiles();
        assert_eq!(stats.find_iqr(), q.q3 - q.q1);
        assert_abs_diff_eq!(stats.find_iqr(), 3.25, epsilon = 1e-12);
        let spread = stats.find_max() - stats.find_min();
        assert_eq!(stats.find_range(), spread);
        assert_abs_diff_eq!(stats.find_range(), 5.6, epsilon = 1e-12);
        assert_eq!(stats.find_mean(), 5.0);
    }

    #[test]
    fn test_empty_dataset() {
        let mut stats = StatisticsEngine::new([0.0, 0.0]);
        assert_eq!(stats.population_size(), 0);
        assert_eq!(stats.sample_size(), -1);
        assert!(stats.find_mean().is_nan());
        assert!(stats.find_mode().is_nan());
        assert!(stats.find_median().is_nan());
        assert!(stats.find_range().is_nan());
        assert!(stats.find_variance(VarianceKind::Population).is_nan());
        assert!(stats.calculate_relative_frequency().is_empty());
        assert!(stats.calculate_cumulative_frequency().is_empty());
        assert!(stats.calculate_fx().is_empty());
    }

    #[test]
    fn test_single_value_sample_statistics_are_not_finite() {
        let mut stats = StatisticsEngine::new([3.0]);
        assert_eq!(stats.sample_size(), 0);
        assert_eq!(stats.find_variance(VarianceKind::Population), 0.0);
        assert!(!stats.find_variance(VarianceKind::Sample).is_finite());
        assert!(!stats.find_std_dev(VarianceKind::Sample).is_finite());
        assert_eq!(stats.find_median(), 3.0);
    }

    #[test]
    fn test_arbitrary_percentiles() {
        let stats = sample();
        assert_eq!(stats.percentile(50.0), Ok(4.0));
        assert!(stats.percentile(0.0).is_err());
        let percentiles = stats.percentiles(&[10.0, 90.0]).unwrap();
        assert_abs_diff_eq!(percentiles.get(90.0).unwrap(), 7.32, epsilon = 1e-12);
    }

    #[test]
    fn test_collect() {
        let mut stats = [1.0, 2.0, 3.0].into_iter().collect::<StatisticsEngine>();
        assert_eq!(stats.find_mean(), 2.0);
    }
}
