use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::Serialize;

/// A single cleaned value of a dataset.
///
/// A `Score` is always finite and non-zero. Equality and ordering follow
/// [`f64::total_cmp`], so two scores are equal exactly when they hold the same
/// `f64`. This makes `Score` the grouping key of
/// [`FrequencyTable`](crate::frequency::FrequencyTable) without any
/// tolerance-based float comparison.
///
/// # Examples
///
/// ```
/// use descstat::score::Score;
///
/// assert_eq!(Score::new(3.4).map(Score::get), Some(3.4));
/// assert_eq!(Score::new(0.0), None);
/// assert_eq!(Score::new(f64::NAN), None);
/// ```
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Wraps `value` if it survives cleaning.
    ///
    /// Returns `None` for zero of either sign, NaN and infinities.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value != 0.0).then_some(Self(value))
    }

    /// Returns the wrapped value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Score {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Reasons a piece of text is not accepted as a [`Score`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseScoreError {
    #[display("not a number: {input:?}")]
    Invalid { input: String },
    #[display("zero values are not scores")]
    Zero,
    #[display("value is not finite: {input:?}")]
    NotFinite { input: String },
}

impl FromStr for Score {
    type Err = ParseScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| ParseScoreError::Invalid {
                input: trimmed.to_owned(),
            })?;
        if !value.is_finite() {
            return Err(ParseScoreError::NotFinite {
                input: trimmed.to_owned(),
            });
        }
        Self::new(value).ok_or(ParseScoreError::Zero)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_rejects_zero_and_non_finite() {
        assert_eq!(Score::new(0.0), None);
        assert_eq!(Score::new(-0.0), None);
        assert_eq!(Score::new(f64::INFINITY), None);
        assert_eq!(Score::new(f64::NEG_INFINITY), None);
        assert_eq!(Score::new(f64::NAN), None);
        assert!(Score::new(-2.5).is_some());
    }

    #[test]
    fn test_groups_identical_values() {
        let mut counts = BTreeMap::new();
        for v in [4.0, 3.4, 4.0, 3.4, 4.0] {
            *counts.entry(Score::new(v).unwrap()).or_insert(0) += 1;
        }
        let counts = counts
            .into_iter()
            .map(|(k, v)| (k.get(), v))
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![(3.4, 2), (4.0, 3)]);
    }

    #[test]
    fn test_ordering_is_numeric() {
        let mut scores = [7.0, -1.5, 2.2, 3.4]
            .into_iter()
            .filter_map(Score::new)
            .collect::<Vec<_>>();
        scores.sort();
        let values = scores.into_iter().map(Score::get).collect::<Vec<_>>();
        assert_eq!(values, vec![-1.5, 2.2, 3.4, 7.0]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(" 6.9 ".parse::<Score>().map(Score::get), Ok(6.9));
        assert_eq!("7".parse::<Score>().map(Score::get), Ok(7.0));
        assert_eq!("0".parse::<Score>(), Err(ParseScoreError::Zero));
        assert_eq!("-0.0".parse::<Score>(), Err(ParseScoreError::Zero));
        assert_eq!(
            "abc".parse::<Score>(),
            Err(ParseScoreError::Invalid {
                input: "abc".to_owned()
            })
        );
        assert_eq!(
            "inf".parse::<Score>(),
            Err(ParseScoreError::NotFinite {
                input: "inf".to_owned()
            })
        );
    }

    #[test]
    fn test_display_matches_shortest_form() {
        assert_eq!(Score::new(7.0).unwrap().to_string(), "7");
        assert_eq!(Score::new(3.4).unwrap().to_string(), "3.4");
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Score::new(2.2).unwrap()).unwrap();
        assert_eq!(json, "2.2");
    }
}
