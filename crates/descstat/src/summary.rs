use std::fmt;

use serde::Serialize;

use crate::{
    engine::{DeviationKind, StatisticsEngine, VarianceKind},
    percentiles::Quartiles,
};

/// Every statistic of a dataset, computed in one go.
///
/// This structure provides a complete overview of a dataset by combining:
/// - Sizes and extremes
/// - Central tendency (mean, median, mode) and quartiles
/// - Dispersion (range, IQR, variances and standard deviations)
/// - The frequency distribution of the distinct values
/// - Per-score columns (FX and deviations from the mean)
///
/// A `Summary` is plain data: it serializes with `serde` and its
/// [`Display`](fmt::Display) implementation renders a text report.
///
/// # Examples
///
/// ```
/// use descstat::engine::StatisticsEngine;
///
/// let mut stats = StatisticsEngine::new([7.0, 3.4, 4.0, 6.9, 4.0, 2.2, 7.8]);
/// let summary = stats.summarize();
///
/// assert_eq!(summary.mean, 5.04);
/// assert_eq!(summary.frequency.len(), 6);
/// assert_eq!(summary.frequency.last().unwrap().cumulative, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Decimal digits derived values are rounded to.
    pub precision: i32,
    pub population_size: usize,
    pub sample_size: i64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub quartiles: Quartiles,
    pub iqr: f64,
    pub population_variance: f64,
    pub sample_variance: f64,
    pub population_std_dev: f64,
    pub sample_std_dev: f64,
    /// One row per distinct value, in ascending value order.
    pub frequency: Vec<FrequencyRow>,
    /// One row per score, in dataset order.
    pub scores: Vec<ScoreRow>,
}

/// A distinct value with its absolute, relative and cumulative frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub value: f64,
    pub count: usize,
    pub relative: f64,
    pub percent: f64,
    pub cumulative: usize,
}

/// A single score with its per-element columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRow {
    pub value: f64,
    /// `value * frequency(value)`
    pub fx: f64,
    /// `value - mean`
    pub deviation: f64,
    /// `(value - mean)²`
    pub squared_deviation: f64,
}

impl StatisticsEngine {
    /// Computes every statistic and collects them into a [`Summary`].
    ///
    /// All cache slots of the engine are filled afterwards.
    pub fn summarize(&mut self) -> Summary {
        let quartiles = self.find_quartiles();
        let median = self.find_median();
        let mean = self.find_mean();
        let mode = self.find_mode();
        let min = self.find_min();
        let max = self.find_max();
        let range = self.find_range();
        let iqr = self.find_iqr();
        let deviations = self.calculate_deviations(DeviationKind::Plain).to_vec();
        let squared_deviations = self.calculate_deviations(DeviationKind::Squared).to_vec();
        let population_variance = self.find_variance(VarianceKind::Population);
        let sample_variance = self.find_variance(VarianceKind::Sample);
        let population_std_dev = self.find_std_dev(VarianceKind::Population);
        let sample_std_dev = self.find_std_dev(VarianceKind::Sample);
        let fx = self.calculate_fx().to_vec();
        let relative = self.calculate_relative_frequency().to_vec();
        let percent = self.calculate_relative_frequency_percent().to_vec();
        let cumulative = self.calculate_cumulative_frequency().to_vec();

        let frequency = self
            .frequency()
            .iter()
            .zip(relative)
            .zip(percent)
            .zip(cumulative)
            .map(
                |((((value, count), relative), percent), cumulative)| FrequencyRow {
                    value: value.get(),
                    count,
                    relative,
                    percent,
                    cumulative,
                },
            )
            .collect();
        let scores = self
            .dataset()
            .values()
            .zip(fx)
            .zip(deviations)
            .zip(squared_deviations)
            .map(
                |(((value, fx), deviation), squared_deviation)| ScoreRow {
                    value,
                    fx,
                    deviation,
                    squared_deviation,
                },
            )
            .collect();

        Summary {
            precision: self.precision(),
            population_size: self.population_size(),
            sample_size: self.sample_size(),
            min,
            max,
            range,
            mean,
            median,
            mode,
            quartiles,
            iqr,
            population_variance,
            sample_variance,
            population_std_dev,
            sample_std_dev,
            frequency,
            scores,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Quartiles { q1, q2, q3 } = self.quartiles;
        writeln!(f, "Population size:    {}", self.population_size)?;
        writeln!(f, "Sample size:        {}", self.sample_size)?;
        writeln!(f, "Quartiles:          Q1={q1}, Q2={q2}, Q3={q3}")?;
        writeln!(f, "Min:                {}", self.min)?;
        writeln!(f, "Max:                {}", self.max)?;
        writeln!(f, "Mean:               {}", self.mean)?;
        writeln!(f, "Median:             {}", self.median)?;
        writeln!(f, "Mode:               {}", self.mode)?;
        writeln!(f, "Range:              {}", self.range)?;
        writeln!(f, "IQR:                {}", self.iqr)?;
        writeln!(f, "Population var:     {}", self.population_variance)?;
        writeln!(f, "Sample var:         {}", self.sample_variance)?;
        writeln!(f, "Population std dev: {}", self.population_std_dev)?;
        writeln!(f, "Sample std dev:     {}", self.sample_std_dev)?;

        writeln!(f)?;
        writeln!(
            f,
            "{:>10} {:>6} {:>8} {:>8} {:>6}",
            "value", "f", "rf", "rf%", "cf"
        )?;
        for row in &self.frequency {
            writeln!(
                f,
                "{:>10} {:>6} {:>8} {:>8} {:>6}",
                row.value, row.count, row.relative, row.percent, row.cumulative
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:>10} {:>10} {:>10} {:>10}",
            "x", "fx", "x-mean", "(x-mean)²"
        )?;
        for row in &self.scores {
            writeln!(
                f,
                "{:>10} {:>10} {:>10} {:>10}",
                row.value, row.fx, row.deviation, row.squared_deviation
            )?;
        }
        Ok(())
    }
}
