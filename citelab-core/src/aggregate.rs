//! Per-country aggregation — collapses the year dimension using each
//! metric's registry rule.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{Aggregation, Metric, RecordSet};

/// A country's aggregated value for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub country: String,
    pub value: f64,
}

/// Aggregate `metric` per country, applying the registry's sum-vs-mean
/// rule. Countries come back in ascending name order; records missing the
/// optional column are skipped.
pub fn aggregate_by_country(set: &RecordSet, metric: Metric) -> Vec<AggregateRow> {
    let mut grouped: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in set.records() {
        if let Some(value) = record.value(metric) {
            let entry = grouped.entry(record.country.as_str()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }
    grouped
        .into_iter()
        .map(|(country, (total, count))| AggregateRow {
            country: country.to_string(),
            value: match metric.aggregation() {
                Aggregation::Sum => total,
                Aggregation::Mean => total / count as f64,
            },
        })
        .collect()
}

/// Aggregate and sort descending by value, ties broken by country
/// ascending for determinism.
pub fn ranked(set: &RecordSet, metric: Metric) -> Vec<AggregateRow> {
    let mut rows = aggregate_by_country(set, metric);
    rows.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.country.cmp(&b.country))
    });
    rows
}

/// The `n` highest-ranked countries for `metric`.
pub fn top_n(set: &RecordSet, metric: Metric, n: usize) -> Vec<AggregateRow> {
    let mut rows = ranked(set, metric);
    rows.truncate(n);
    rows
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
            times_cited: documents * 8.0,
            cnci,
            collab_cnci: cnci,
            percent_docs_cited: 75.0,
            percent_top_one_percent: 1.0,
            percent_top_ten_percent: None,
        }
    }

    fn two_year_set() -> RecordSet {
        RecordSet::new(vec![
            record("Alpha", 2020, 100.0, 1.0),
            record("Alpha", 2021, 300.0, 2.0),
            record("Beta", 2020, 50.0, 1.8),
        ])
        .unwrap()
    }

    // ── Aggregation rules ──

    #[test]
    fn additive_metric_is_summed() {
        let rows = aggregate_by_country(&two_year_set(), Metric::Documents);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].country, "Alpha");
        assert_eq!(rows[0].value, 400.0);
        assert_eq!(rows[1].value, 50.0);
    }

    #[test]
    fn rate_metric_is_averaged() {
        let rows = aggregate_by_country(&two_year_set(), Metric::Cnci);
        assert_eq!(rows[0].country, "Alpha");
        assert!((rows[0].value - 1.5).abs() < 1e-12);
        assert!((rows[1].value - 1.8).abs() < 1e-12);
    }

    #[test]
    fn records_without_optional_column_are_skipped() {
        let mut with_top_ten = record("Alpha", 2020, 100.0, 1.0);
        with_top_ten.percent_top_ten_percent = Some(12.0);
        let set = RecordSet::new(vec![with_top_ten, record("Beta", 2020, 50.0, 1.8)]).unwrap();

        let rows = aggregate_by_country(&set, Metric::PercentTopTenPercent);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "Alpha");
        assert_eq!(rows[0].value, 12.0);
    }

    #[test]
    fn empty_set_aggregates_to_nothing() {
        let set = RecordSet::new(vec![]).unwrap();
        assert!(aggregate_by_country(&set, Metric::Documents).is_empty());
    }

    // ── Ranking ──

    #[test]
    fn ranked_sorts_descending() {
        let rows = ranked(&two_year_set(), Metric::Documents);
        assert_eq!(rows[0].country, "Alpha");
        assert_eq!(rows[1].country, "Beta");
    }

    #[test]
    fn ranked_breaks_ties_lexicographically() {
        let set = RecordSet::new(vec![
            record("Beta", 2020, 100.0, 1.0),
            record("Alpha", 2020, 100.0, 1.0),
        ])
        .unwrap();
        let rows = ranked(&set, Metric::Documents);
        assert_eq!(rows[0].country, "Alpha");
        assert_eq!(rows[1].country, "Beta");
    }

    #[test]
    fn top_n_truncates() {
        let rows = top_n(&two_year_set(), Metric::Documents, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "Alpha");
    }
}
