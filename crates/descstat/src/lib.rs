//! Descriptive statistics over a one-dimensional numeric dataset.
//!
//! This crate provides:
//!
//! - **Cleaning**: drop zero and non-numeric entries, sort the rest
//! - **Central tendency**: mean, median and mode
//! - **Dispersion**: range, interquartile range, deviations, variance and
//!   standard deviation (population and sample)
//! - **Percentiles**: quartiles and arbitrary percentiles by linear
//!   interpolation
//! - **Frequency distributions**: absolute, relative, percent and cumulative
//!   frequencies
//!
//! # Modules
//!
//! - [`engine`]: [`StatisticsEngine`], which computes and caches every statistic
//! - [`dataset`]: cleaning raw input into a sorted [`Dataset`]
//! - [`score`]: the canonical value type used for sorting and grouping
//! - [`frequency`]: frequency tables over distinct values
//! - [`percentiles`]: percentile interpolation and quartiles
//! - [`rounding`]: decimal rounding of derived values
//! - [`summary`]: a serializable snapshot of every statistic
//! - [`config`]: engine settings
//!
//! # Examples
//!
//! ## Computing statistics on demand
//!
//! ```
//! use descstat::engine::{StatisticsEngine, VarianceKind};
//!
//! let mut stats = StatisticsEngine::new([7.0, 3.4, 4.0, 6.9, 4.0, 2.2, 7.8]);
//!
//! assert_eq!(stats.find_mean(), 5.04);
//! assert_eq!(stats.find_median(), 4.0);
//! assert_eq!(stats.find_variance(VarianceKind::Population), 3.98);
//! assert_eq!(stats.calculate_cumulative_frequency(), &[1, 2, 4, 5, 6, 7]);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use descstat::percentiles::compute_percentile;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(compute_percentile(&values, 50.0), Ok(3.0));
//! assert_eq!(compute_percentile(&values, 0.25), Ok(2.0));
//! ```
//!
//! ## Producing a report
//!
//! ```
//! use descstat::engine::StatisticsEngine;
//!
//! let mut stats = StatisticsEngine::with_precision([1.5, 2.5, 2.5, 9.0], 1);
//! let summary = stats.summarize();
//! assert_eq!(summary.mode, 2.5);
//! println!("{summary}");
//! ```

pub mod config;
pub mod dataset;
pub mod engine;
pub mod frequency;
pub mod percentiles;
pub mod rounding;
pub mod score;
pub mod summary;

pub use self::{
    config::EngineConfig,
    dataset::Dataset,
    engine::{DeviationKind, StatisticsEngine, VarianceKind},
    summary::Summary,
};
