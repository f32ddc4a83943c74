//! Quadrant segmentation: classify countries against the cross-country
//! medians of two aggregated metrics.

use serde::Serialize;
use std::collections::BTreeMap;

use super::stats;
use super::AnalysisError;
use crate::aggregate::aggregate_by_country;
use crate::domain::{Metric, RecordSet};

/// Position relative to the two medians, x first.
///
/// Ties at exactly the median go to the High side (≥), so a country
/// sitting on a median line lands in a High quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quadrant {
    HighHigh,
    HighLow,
    LowHigh,
    LowLow,
}

/// One country's aggregated coordinates and quadrant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantRow {
    pub country: String,
    pub x_value: f64,
    pub y_value: f64,
    pub quadrant: Quadrant,
}

/// Segmentation of all countries against the medians of two metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantSegmentation {
    pub rows: Vec<QuadrantRow>,
    pub median_x: f64,
    pub median_y: f64,
}

impl QuadrantSegmentation {
    /// Aggregate both metrics per country (registry rule), compute the
    /// medians over the aggregated values, and classify every country
    /// carrying both metrics.
    pub fn compute(
        set: &RecordSet,
        x_metric: Metric,
        y_metric: Metric,
    ) -> Result<Self, AnalysisError> {
        let xs = aggregate_by_country(set, x_metric);
        let ys: BTreeMap<String, f64> = aggregate_by_country(set, y_metric)
            .into_iter()
            .map(|row| (row.country, row.value))
            .collect();

        // Countries missing either metric are excluded from both the
        // medians and the rows.
        let joined: Vec<(String, f64, f64)> = xs
            .into_iter()
            .filter_map(|row| ys.get(&row.country).map(|&y| (row.country, row.value, y)))
            .collect();
        if joined.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let x_values: Vec<f64> = joined.iter().map(|(_, x, _)| *x).collect();
        let y_values: Vec<f64> = joined.iter().map(|(_, _, y)| *y).collect();
        let median_x = stats::percentile(&x_values, 0.5);
        let median_y = stats::percentile(&y_values, 0.5);

        let rows = joined
            .into_iter()
            .map(|(country, x_value, y_value)| {
                let quadrant = match (x_value >= median_x, y_value >= median_y) {
                    (true, true) => Quadrant::HighHigh,
                    (true, false) => Quadrant::HighLow,
                    (false, true) => Quadrant::LowHigh,
                    (false, false) => Quadrant::LowLow,
                };
                QuadrantRow {
                    country,
                    x_value,
                    y_value,
                    quadrant,
                }
            })
            .collect();

        Ok(Self {
            rows,
            median_x,
            median_y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

    fn record(country: &str, year: i32, documents: f64, cnci: f64) -> Record {
        Record {
            country: country.to_string(),
            year,
            documents,
            times_cited: documents * 10.0,
            cnci,
            collab_cnci: cnci,
            percent_docs_cited: 80.0,
            percent_top_one_percent: 1.0,
            percent_top_ten_percent: None,
        }
    }

    fn four_corner_set() -> RecordSet {
        RecordSet::new(vec![
            record("Elite", 2020, 1000.0, 2.0),
            record("Mass", 2020, 900.0, 0.5),
            record("Niche", 2020, 10.0, 1.9),
            record("Lagging", 2020, 20.0, 0.6),
        ])
        .unwrap()
    }

    fn quadrant_of(seg: &QuadrantSegmentation, country: &str) -> Quadrant {
        seg.rows
            .iter()
            .find(|r| r.country == country)
            .unwrap()
            .quadrant
    }

    // ── Classification ──

    #[test]
    fn four_corners_land_in_four_quadrants() {
        let seg =
            QuadrantSegmentation::compute(&four_corner_set(), Metric::Documents, Metric::Cnci)
                .unwrap();
        assert_eq!(quadrant_of(&seg, "Elite"), Quadrant::HighHigh);
        assert_eq!(quadrant_of(&seg, "Mass"), Quadrant::HighLow);
        assert_eq!(quadrant_of(&seg, "Niche"), Quadrant::LowHigh);
        assert_eq!(quadrant_of(&seg, "Lagging"), Quadrant::LowLow);
    }

    #[test]
    fn medians_use_aggregated_values_not_raw_records() {
        // Alpha's documents sum to 400 across two years; the median must
        // see 400, not 100 and 300 separately.
        let set = RecordSet::new(vec![
            record("Alpha", 2020, 100.0, 1.0),
            record("Alpha", 2021, 300.0, 1.0),
            record("Beta", 2020, 100.0, 1.0),
        ])
        .unwrap();
        let seg = QuadrantSegmentation::compute(&set, Metric::Documents, Metric::Cnci).unwrap();
        assert_eq!(seg.median_x, 250.0);
    }

    #[test]
    fn ties_at_the_median_go_high() {
        // Two countries: both medians are midway, so with interpolation
        // the larger country is exactly at or above, the smaller below.
        let set = RecordSet::new(vec![
            record("Alpha", 2020, 100.0, 1.0),
            record("Beta", 2020, 100.0, 1.0),
        ])
        .unwrap();
        let seg = QuadrantSegmentation::compute(&set, Metric::Documents, Metric::Cnci).unwrap();
        // Every value equals the median; the ≥ convention puts all rows
        // in HighHigh.
        for row in &seg.rows {
            assert_eq!(row.quadrant, Quadrant::HighHigh);
        }
    }

    // ── Partition property ──

    #[test]
    fn every_country_appears_exactly_once() {
        let seg =
            QuadrantSegmentation::compute(&four_corner_set(), Metric::Documents, Metric::Cnci)
                .unwrap();
        let mut names: Vec<&str> = seg.rows.iter().map(|r| r.country.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Elite", "Lagging", "Mass", "Niche"]);
    }

    // ── Missing optional metric ──

    #[test]
    fn countries_missing_a_metric_are_excluded() {
        let mut with_top_ten = record("Alpha", 2020, 100.0, 1.0);
        with_top_ten.percent_top_ten_percent = Some(10.0);
        let set = RecordSet::new(vec![with_top_ten, record("Beta", 2020, 200.0, 1.2)]).unwrap();

        let seg =
            QuadrantSegmentation::compute(&set, Metric::Documents, Metric::PercentTopTenPercent)
                .unwrap();
        assert_eq!(seg.rows.len(), 1);
        assert_eq!(seg.rows[0].country, "Alpha");
    }

    #[test]
    fn no_complete_rows_is_empty_input() {
        let set = RecordSet::new(vec![record("Alpha", 2020, 100.0, 1.0)]).unwrap();
        assert_eq!(
            QuadrantSegmentation::compute(&set, Metric::Documents, Metric::PercentTopTenPercent),
            Err(AnalysisError::EmptyInput)
        );
    }

    #[test]
    fn empty_set_is_empty_input() {
        let set = RecordSet::new(vec![]).unwrap();
        assert_eq!(
            QuadrantSegmentation::compute(&set, Metric::Documents, Metric::Cnci),
            Err(AnalysisError::EmptyInput)
        );
    }
}
