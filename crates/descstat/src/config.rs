use serde::{Deserialize, Serialize};

/// Rounding precision used when none is given.
pub const DEFAULT_PRECISION: i32 = 2;

/// Settings of a [`StatisticsEngine`](crate::engine::StatisticsEngine).
///
/// # Examples
///
/// ```
/// use descstat::config::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.precision, 2);
///
/// let config: EngineConfig = serde_json::from_str(r#"{"precision": 4}"#).unwrap();
/// assert_eq!(config.precision, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Decimal digits every derived statistic is rounded to.
    pub precision: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}
