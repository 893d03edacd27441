//! Frequency distributions over the distinct values of a dataset.
//!
//! Distinct values are always visited in ascending order, so relative and
//! cumulative frequencies line up with [`FrequencyTable::iter`].

use std::collections::BTreeMap;

use crate::{rounding, score::Score};

/// Occurrence count of every distinct value in a dataset.
///
/// # Examples
///
/// ```
/// use descstat::{dataset::Dataset, frequency::FrequencyTable};
///
/// let dataset = Dataset::new([4.0, 2.2, 4.0]);
/// let table = FrequencyTable::from_sorted(dataset.scores());
///
/// assert_eq!(table.get(4.0), Some(2));
/// assert_eq!(table.get(3.0), None);
/// assert_eq!(table.total(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Score, usize>,
    total: usize,
}

impl FrequencyTable {
    /// Counts the scores of an already sorted dataset.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_scores` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_scores: &[Score]) -> Self {
        debug_assert!(
            sorted_scores.is_sorted(),
            "scores must be sorted in ascending order"
        );
        let mut counts = BTreeMap::new();
        for &score in sorted_scores {
            *counts.entry(score).or_insert(0) += 1;
        }
        Self {
            counts,
            total: sorted_scores.len(),
        }
    }

    /// The number of occurrences of `score`, zero if absent.
    #[must_use]
    pub fn count(&self, score: Score) -> usize {
        self.counts.get(&score).copied().unwrap_or(0)
    }

    /// The number of occurrences of `value`, `None` if it never occurs.
    #[must_use]
    pub fn get(&self, value: f64) -> Option<usize> {
        self.counts.get(&Score::new(value)?).copied()
    }

    /// The sum of all counts, which equals the population size.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// The number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates (value, count) pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (Score, usize)> + '_ {
        self.counts.iter().map(|(&score, &count)| (score, count))
    }

    /// The most frequent value.
    ///
    /// Ties are broken in favour of the lowest value. Returns `None` for an
    /// empty table.
    ///
    /// # Examples
    ///
    /// ```
    /// use descstat::{dataset::Dataset, frequency::FrequencyTable};
    ///
    /// let dataset = Dataset::new([9.0, 3.0, 9.0, 3.0, 5.0]);
    /// let table = FrequencyTable::from_sorted(dataset.scores());
    /// assert_eq!(table.mode().map(|s| s.get()), Some(3.0));
    /// ```
    #[must_use]
    pub fn mode(&self) -> Option<Score> {
        let mut best: Option<(Score, usize)> = None;
        for (score, count) in self.iter() {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((score, count));
            }
        }
        best.map(|(score, _)| score)
    }

    /// Each count divided by the total, rounded to `precision`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn relative(&self, precision: i32) -> Vec<f64> {
        let total = self.total as f64;
        rounding::round_all(
            self.counts.values().map(|&count| count as f64 / total),
            precision,
        )
    }

    /// Running sum of the counts.
    ///
    /// The sequence is non-decreasing and its last element equals
    /// [`total`](Self::total).
    #[must_use]
    pub fn cumulative(&self) -> Vec<usize> {
        self.counts
            .values()
            .scan(0, |running, &count| {
                *running += count;
                Some(*running)
            })
            .collect()
    }

    /// `value * count(value)` for every score of a sorted dataset, aligned
    /// index for index with `sorted_scores`.
    ///
    /// Repeated values repeat the same product.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fx(&self, sorted_scores: &[Score], precision: i32) -> Vec<f64> {
        rounding::round_all(
            sorted_scores
                .iter()
                .map(|&score| score.get() * self.count(score) as f64),
            precision,
        )
    }
}

/// Scales relative frequencies to percentages, rounded to `precision`.
#[must_use]
pub fn to_percent(relative: &[f64], precision: i32) -> Vec<f64> {
    rounding::round_all(relative.iter().map(|&rf| rf * 100.0), precision)
}
