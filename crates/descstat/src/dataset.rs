//! Cleaning raw input into a sorted dataset.
//!
//! Cleaning drops every zero entry, every non-finite entry and, for text
//! input, every entry that does not parse as a number. The survivors are
//! sorted in ascending order.

use crate::score::Score;

/// A cleaned, sorted sequence of scores.
///
/// # Examples
///
/// ```
/// use descstat::dataset::Dataset;
///
/// let dataset = Dataset::new([7.0, 0.0, 3.4, 4.0]);
/// assert_eq!(dataset.values().collect::<Vec<_>>(), vec![3.4, 4.0, 7.0]);
/// assert_eq!(dataset.population_size(), 3);
/// assert_eq!(dataset.sample_size(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    scores: Vec<Score>,
}

impl Dataset {
    /// Cleans numeric input.
    #[must_use]
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        let scores = values
            .into_iter()
            .map(Into::into)
            .filter_map(|value| {
                let score = Score::new(value);
                if score.is_none() {
                    log::debug!("dropping value {value} during cleaning");
                }
                score
            })
            .collect();
        Self::from_scores(scores)
    }

    /// Cleans numeric-like text input.
    ///
    /// Surrounding whitespace is ignored. Entries that do not parse, parse to
    /// zero, or parse to a non-finite number are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use descstat::dataset::Dataset;
    ///
    /// let dataset = Dataset::parse(["7", " 3.4", "", "0", "n/a", "4"]);
    /// assert_eq!(dataset.values().collect::<Vec<_>>(), vec![3.4, 4.0, 7.0]);
    /// ```
    #[must_use]
    pub fn parse<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let scores = values
            .into_iter()
            .filter_map(|text| match text.as_ref().parse::<Score>() {
                Ok(score) => Some(score),
                Err(e) => {
                    log::debug!("dropping entry {:?} during cleaning: {e}", text.as_ref());
                    None
                }
            })
            .collect();
        Self::from_scores(scores)
    }

    /// Sorts already validated scores.
    #[must_use]
    pub fn from_scores(mut scores: Vec<Score>) -> Self {
        scores.sort_unstable();
        Self { scores }
    }

    /// The cleaned scores in ascending order.
    #[must_use]
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// The cleaned values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().copied().map(Score::get)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The number of cleaned values.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.scores.len()
    }

    /// The population size minus one.
    ///
    /// This is `-1` for an empty dataset and `0` for a single value; sample
    /// statistics divide by it without guarding.
    #[expect(clippy::cast_possible_wrap)]
    #[must_use]
    pub fn sample_size(&self) -> i64 {
        self.scores.len() as i64 - 1
    }

    /// The smallest score, `None` if empty.
    #[must_use]
    pub fn min(&self) -> Option<Score> {
        self.scores.first().copied()
    }

    /// The largest score, `None` if empty.
    #[must_use]
    pub fn max(&self) -> Option<Score> {
        self.scores.last().copied()
    }
}

impl FromIterator<f64> for Dataset {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleans_and_sorts() {
        let dataset = Dataset::new([7.0, 3.4, 4.0, 6.9, 4.0, 2.2, 7.8]);
        assert_eq!(
            dataset.values().collect::<Vec<_>>(),
            vec![2.2, 3.4, 4.0, 4.0, 6.9, 7.0, 7.8]
        );
        assert_eq!(dataset.population_size(), 7);
        assert_eq!(dataset.sample_size(), 6);
        assert_eq!(dataset.min().map(Score::get), Some(2.2));
        assert_eq!(dataset.max().map(Score::get), Some(7.8));
    }

    #[test]
    fn test_drops_zero_and_non_finite() {
        let dataset = Dataset::new([0.0, -0.0, f64::NAN, f64::INFINITY, -3.0, 1.5]);
        assert_eq!(dataset.values().collect::<Vec<_>>(), vec![-3.0, 1.5]);
    }

    #[test]
    fn test_accepts_integer_input() {
        let dataset = Dataset::new([3_i32, 0, 1, 2]);
        assert_eq!(dataset.values().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_and_all_zero() {
        for dataset in [Dataset::new(Vec::<f64>::new()), Dataset::new([0.0, 0.0])] {
            assert!(dataset.is_empty());
            assert_eq!(dataset.population_size(), 0);
            assert_eq!(dataset.sample_size(), -1);
            assert_eq!(dataset.min(), None);
            assert_eq!(dataset.max(), None);
        }
    }

    #[test]
    fn test_parse_drops_invalid_text() {
        let dataset = Dataset::parse(vec!["2.5".to_owned(), "x".to_owned(), "-1".to_owned()]);
        assert_eq!(dataset.values().collect::<Vec<_>>(), vec![-1.0, 2.5]);
    }

    #[test]
    fn test_collect() {
        let dataset = [2.0, 1.0].into_iter().collect::<Dataset>();
        assert_eq!(dataset.values().collect::<Vec<_>>(), vec![1.0, 2.0]);
    }
}
