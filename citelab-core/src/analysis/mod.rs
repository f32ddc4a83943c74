//! Analysis components — pure transformations from a [`RecordSet`] into
//! the derived quantities each view displays.
//!
//! Every component is a function of its inputs alone: no component holds
//! state between calls or mutates the record set.
//!
//! [`RecordSet`]: crate::domain::RecordSet

pub mod benchmark;
pub mod concentration;
pub mod correlation;
pub mod distribution;
pub mod dominance;
pub mod quadrant;
pub mod trend;

pub(crate) mod stats;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the analysis layer. All are local to one computation and
/// non-fatal to a surrounding report: the affected view degrades, the
/// rest still render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The computation received zero qualifying records.
    #[error("no qualifying records")]
    EmptyInput,

    /// Fewer entities or periods than the computation needs.
    #[error("insufficient data: {needed} required, {got} available")]
    InsufficientData { needed: usize, got: usize },

    /// A zero-variance column makes the statistic undefined.
    #[error("'{column}' has zero variance; statistic undefined")]
    InsufficientVariance { column: &'static str },
}

/// Policy constants for the analysis layer.
///
/// The defaults are descriptive-statistics conventions, not values derived
/// from the data, so they live here instead of being hard-coded at each
/// call site. The CLI can override them from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// |skewness| below this is labeled Symmetric.
    pub skew_symmetry_threshold: f64,
    /// Tukey fence multiplier on the IQR.
    pub iqr_multiplier: f64,
    /// Cumulative share the concentration cutoff must reach.
    pub concentration_target_share: f64,
    /// |r| at or above this is labeled Strong.
    pub strong_correlation: f64,
    /// |r| at or above this, below strong, is labeled Moderate.
    pub moderate_correlation: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            skew_symmetry_threshold: 0.5,
            iqr_multiplier: 1.5,
            concentration_target_share: 0.80,
            strong_correlation: 0.7,
            moderate_correlation: 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_conventions() {
        let config = AnalysisConfig::default();
        assert_eq!(config.skew_symmetry_threshold, 0.5);
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.concentration_target_share, 0.80);
        assert_eq!(config.strong_correlation, 0.7);
        assert_eq!(config.moderate_correlation, 0.4);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"iqr_multiplier": 3.0}"#).unwrap();
        assert_eq!(config.iqr_multiplier, 3.0);
        assert_eq!(config.skew_symmetry_threshold, 0.5);
    }
}
