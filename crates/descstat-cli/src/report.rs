use std::fmt;

use descstat::{Summary, percentiles::Percentiles};
use serde::Serialize;

/// Everything printed by the `descstat` command.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub summary: Summary,
    pub percentiles: Vec<PercentileRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileRow {
    /// The percentile as requested, fraction or percentage
    pub percentile: f64,
    pub value: f64,
}

impl Report {
    pub fn new(summary: Summary, percentiles: &Percentiles) -> Self {
        let percentiles = percentiles
            .iter()
            .map(|(percentile, value)| PercentileRow { percentile, value })
            .collect();
        Self {
            summary,
            percentiles,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)?;
        if self.percentiles.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "{:>10} {:>10}", "p", "value")?;
        for row in &self.percentiles {
            writeln!(f, "{:>10} {:>10}", row.percentile, row.value)?;
        }
        Ok(())
    }
}
