//! Concentration (Pareto/Lorenz) curve: how unevenly a metric's total is
//! distributed across countries, and how many countries it takes to reach
//! the target share of the total.

use serde::Serialize;
use std::cmp::Ordering;

use super::{AnalysisConfig, AnalysisError};
use crate::aggregate::aggregate_by_country;
use crate::domain::{Metric, RecordSet};

/// One country's position on the curve, in descending-value order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationPoint {
    pub country: String,
    /// Aggregated metric value for the country.
    pub value: f64,
    /// Running country count over total countries, in (0, 1].
    pub entity_fraction: f64,
    /// Running value sum over the grand total, in (0, 1].
    pub cumulative_share: f64,
}

/// The full curve plus the share-target cutoff.
///
/// A grand total of zero yields the degenerate curve: no points and a
/// cutoff of 1.0 by convention, since no meaningful concentration exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationCurve {
    pub points: Vec<ConcentrationPoint>,
    /// Smallest entity fraction whose cumulative share reaches the target.
    pub cutoff_entity_fraction: f64,
    /// Grand total of the aggregated metric.
    pub total: f64,
}

impl ConcentrationCurve {
    /// Compute with default policy constants (80% target share).
    pub fn compute(set: &RecordSet, metric: Metric) -> Result<Self, AnalysisError> {
        Self::compute_with(set, metric, &AnalysisConfig::default())
    }

    /// Aggregate `metric` per country, order descending (ties broken by
    /// country ascending), and accumulate shares.
    pub fn compute_with(
        set: &RecordSet,
        metric: Metric,
        config: &AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        let mut rows = aggregate_by_country(set, metric);
        if rows.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        rows.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.country.cmp(&b.country))
        });

        let total: f64 = rows.iter().map(|r| r.value).sum();
        if total <= 0.0 {
            return Ok(Self {
                points: Vec::new(),
                cutoff_entity_fraction: 1.0,
                total,
            });
        }

        let count = rows.len() as f64;
        let mut cumulative = 0.0;
        let mut points = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            cumulative += row.value;
            points.push(ConcentrationPoint {
                country: row.country,
                value: row.value,
                entity_fraction: (i + 1) as f64 / count,
                cumulative_share: cumulative / total,
            });
        }

        // Floating-point accumulation can leave the last share a hair
        // under the target; fall back to 1.0 rather than index past the
        // end.
        let cutoff_entity_fraction = points
            .iter()
            .find(|p| p.cumulative_share >= config.concentration_target_share)
            .map(|p| p.entity_fraction)
            .unwrap_or(1.0);

        Ok(Self {
            points,
            cutoff_entity_fraction,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

    fn record(country: &str, year: i32, documents: f64) -> Record {
        Record {
            country: country.to_string(),
            year,
            documents,
            times_cited: documents,
            cnci: 1.0,
            collab_cnci: 1.0,
            percent_docs_cited: 80.0,
            percent_top_one_percent: 1.0,
            percent_top_ten_percent: None,
        }
    }

    // ── Worked example: Alpha 100 / Beta 300 ──

    #[test]
    fn two_country_scenario() {
        let set = RecordSet::new(vec![
            record("Alpha", 2020, 100.0),
            record("Beta", 2020, 300.0),
        ])
        .unwrap();
        let curve = ConcentrationCurve::compute(&set, Metric::Documents).unwrap();

        assert_eq!(curve.points.len(), 2);
        assert_eq!(curve.points[0].country, "Beta");
        assert_eq!(curve.points[0].entity_fraction, 0.5);
        assert_eq!(curve.points[0].cumulative_share, 0.75);
        assert_eq!(curve.points[1].country, "Alpha");
        assert_eq!(curve.points[1].entity_fraction, 1.0);
        assert_eq!(curve.points[1].cumulative_share, 1.0);
        assert_eq!(curve.cutoff_entity_fraction, 0.5);
    }

    #[test]
    fn aggregates_across_years_before_ranking() {
        let set = RecordSet::new(vec![
            record("Alpha", 2020, 100.0),
            record("Alpha", 2021, 250.0),
            record("Beta", 2020, 300.0),
        ])
        .unwrap();
        let curve = ConcentrationCurve::compute(&set, Metric::Documents).unwrap();
        // Alpha sums to 350, overtaking Beta's 300.
        assert_eq!(curve.points[0].country, "Alpha");
        assert_eq!(curve.points[0].value, 350.0);
    }

    #[test]
    fn ties_order_by_country_name() {
        let set = RecordSet::new(vec![
            record("Beta", 2020, 100.0),
            record("Alpha", 2020, 100.0),
        ])
        .unwrap();
        let curve = ConcentrationCurve::compute(&set, Metric::Documents).unwrap();
        assert_eq!(curve.points[0].country, "Alpha");
        assert_eq!(curve.points[1].country, "Beta");
    }

    #[test]
    fn final_cumulative_share_is_one() {
        let set = RecordSet::new(vec![
            record("Alpha", 2020, 17.0),
            record("Beta", 2020, 23.0),
            record("Gamma", 2020, 41.0),
            record("Delta", 2020, 7.0),
        ])
        .unwrap();
        let curve = ConcentrationCurve::compute(&set, Metric::Documents).unwrap();
        let last = curve.points.last().unwrap();
        assert!((last.cumulative_share - 1.0).abs() < 1e-12);
        assert_eq!(last.entity_fraction, 1.0);
    }

    // ── Degenerate cases ──

    #[test]
    fn zero_total_degrades_to_full_cutoff() {
        let set = RecordSet::new(vec![
            record("Alpha", 2020, 0.0),
            record("Beta", 2020, 0.0),
        ])
        .unwrap();
        let curve = ConcentrationCurve::compute(&set, Metric::Documents).unwrap();
        assert!(curve.points.is_empty());
        assert_eq!(curve.cutoff_entity_fraction, 1.0);
        assert_eq!(curve.total, 0.0);
    }

    #[test]
    fn empty_set_is_empty_input() {
        let set = RecordSet::new(vec![]).unwrap();
        assert_eq!(
            ConcentrationCurve::compute(&set, Metric::Documents),
            Err(AnalysisError::EmptyInput)
        );
    }

    #[test]
    fn single_country_cutoff_is_one() {
        let set = RecordSet::new(vec![record("Alpha", 2020, 50.0)]).unwrap();
        let curve = ConcentrationCurve::compute(&set, Metric::Documents).unwrap();
        assert_eq!(curve.cutoff_entity_fraction, 1.0);
        assert_eq!(curve.points[0].cumulative_share, 1.0);
    }

    // ── Evenly spread totals ──

    #[test]
    fn even_distribution_needs_most_countries() {
        // Five equal countries: 80% of the total needs 4 of 5.
        let set = RecordSet::new(
            (0..5)
                .map(|i| record(&format!("C{i}"), 2020, 10.0))
                .collect(),
        )
        .unwrap();
        let curve = ConcentrationCurve::compute(&set, Metric::Documents).unwrap();
        assert_eq!(curve.cutoff_entity_fraction, 0.8);
    }
}
