//! Pairwise Pearson correlation between two metric columns, with a
//! qualitative strength label.

use serde::Serialize;

use super::stats;
use super::{AnalysisConfig, AnalysisError};
use crate::domain::{Metric, RecordSet};

/// Qualitative strength of |r|.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthLabel {
    Strong,
    Moderate,
    Weak,
}

/// Pearson correlation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    /// Coefficient in [-1, 1].
    pub r: f64,
    pub strength: StrengthLabel,
    /// Number of (x, y) pairs used.
    pub n: usize,
}

/// Pearson r with default strength cut points.
pub fn pearson(set: &RecordSet, x: Metric, y: Metric) -> Result<Correlation, AnalysisError> {
    pearson_with(set, x, y, &AnalysisConfig::default())
}

/// Pearson correlation over paired (x, y) values from the same record.
///
/// Records missing either column are excluded from the pairing only, not
/// from the dataset. A zero-variance column makes the coefficient
/// undefined and is reported as a typed error, never a silent 0 or NaN.
pub fn pearson_with(
    set: &RecordSet,
    x: Metric,
    y: Metric,
    config: &AnalysisConfig,
) -> Result<Correlation, AnalysisError> {
    let pairs: Vec<(f64, f64)> = set
        .records()
        .iter()
        .filter_map(|r| r.value(x).zip(r.value(y)))
        .collect();
    if pairs.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    if pairs.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2,
            got: pairs.len(),
        });
    }

    let n = pairs.len();
    let mean_x = stats::mean(&pairs.iter().map(|p| p.0).collect::<Vec<_>>());
    let mean_y = stats::mean(&pairs.iter().map(|p| p.1).collect::<Vec<_>>());

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (px, py) in &pairs {
        let dx = px - mean_x;
        let dy = py - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if stats::effectively_zero(sxx.sqrt(), mean_x) {
        return Err(AnalysisError::InsufficientVariance { column: x.column() });
    }
    if stats::effectively_zero(syy.sqrt(), mean_y) {
        return Err(AnalysisError::InsufficientVariance { column: y.column() });
    }

    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);
    let strength = if r.abs() >= config.strong_correlation {
        StrengthLabel::Strong
    } else if r.abs() >= config.moderate_correlation {
        StrengthLabel::Moderate
    } else {
        StrengthLabel::Weak
    };

    Ok(Correlation { r, strength, n })
}
