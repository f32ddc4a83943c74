//! Distribution statistics for one metric column: central tendency,
//! skewness, and Tukey IQR outlier detection.

use serde::Serialize;

use super::stats;
use super::{AnalysisConfig, AnalysisError};
use crate::domain::{Metric, RecordSet};

/// Side of the fence an outlier fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierTag {
    Low,
    High,
}

/// Qualitative shape of the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkewLabel {
    Symmetric,
    RightSkewed,
    LeftSkewed,
}

/// One observation outside the Tukey fences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlier {
    pub country: String,
    pub year: i32,
    pub value: f64,
    pub tag: OutlierTag,
}

/// Summary statistics for one metric column across all observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionStats {
    pub mean: f64,
    pub median: f64,
    pub skewness: f64,
    pub skew_label: SkewLabel,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outliers: Vec<Outlier>,
}

impl DistributionStats {
    /// Compute with default policy constants.
    pub fn compute(set: &RecordSet, metric: Metric) -> Result<Self, AnalysisError> {
        Self::compute_with(set, metric, &AnalysisConfig::default())
    }

    /// Compute mean, median, skewness, quartiles, and Tukey fences for
    /// `metric`.
    ///
    /// A zero IQR collapses the fences onto the quartile value, in which
    /// case zero outliers is the expected result, not an error.
    pub fn compute_with(
        set: &RecordSet,
        metric: Metric,
        config: &AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        let values = set.metric_values(metric);
        if values.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let mean = stats::mean(&values);
        let median = stats::percentile(&values, 0.5);
        let skewness = stats::sample_skewness(&values);
        let skew_label = if skewness >= config.skew_symmetry_threshold {
            SkewLabel::RightSkewed
        } else if skewness <= -config.skew_symmetry_threshold {
            SkewLabel::LeftSkewed
        } else {
            SkewLabel::Symmetric
        };

        let q1 = stats::percentile(&values, 0.25);
        let q3 = stats::percentile(&values, 0.75);
        let iqr = q3 - q1;
        let lower_bound = q1 - config.iqr_multiplier * iqr;
        let upper_bound = q3 + config.iqr_multiplier * iqr;

        let outliers = set
            .records()
            .iter()
            .filter_map(|record| {
                let value = record.value(metric)?;
                let tag = if value < lower_bound {
                    OutlierTag::Low
                } else if value > upper_bound {
                    OutlierTag::High
                } else {
                    return None;
                };
                Some(Outlier {
                    country: record.country.clone(),
                    year: record.year,
                    value,
                    tag,
                })
            })
            .collect();

        Ok(Self {
            mean,
            median,
            skewness,
            skew_label,
            q1,
            q3,
            iqr,
            lower_bound,
            upper_bound,
            outliers,
        })
    }
}
