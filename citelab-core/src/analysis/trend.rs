//! Year-by-year trend series for selected countries.

use serde::Serialize;

use super::AnalysisError;
use crate::domain::{Metric, RecordSet};

/// One year's value in a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// A country's year-ordered values for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub country: String,
    pub points: Vec<TrendPoint>,
}

/// Per-country series of `metric` for the selected countries, countries
/// ascending, points year-ascending. Selected countries without any data
/// for the metric are omitted.
pub fn trend_series(
    set: &RecordSet,
    metric: Metric,
    countries: &[String],
) -> Result<Vec<TrendSeries>, AnalysisError> {
    let filtered = set.filter_countries(countries);
    let mut out = Vec::new();
    for country in filtered.countries() {
        let mut points: Vec<TrendPoint> = filtered
            .records()
            .iter()
            .filter(|r| r.country == country)
            .filter_map(|r| r.value(metric).map(|value| TrendPoint { year: r.year, value }))
            .collect();
        if points.is_empty() {
            continue;
        }
        points.sort_by_key(|p| p.year);
        out.push(TrendSeries { country, points });
    }
    if out.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    Ok(out)
}
