//! Dominance margins: how far ahead the leader is of the runner-up,
//! per year globally or per pair of selected rivals.
//!
//! The margin is normalized: (leader − runner_up) / (leader + runner_up),
//! in [0, 1] for non-negative metrics. 0 means tied, 1 means the
//! runner-up is at zero.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::AnalysisError;
use crate::domain::{Metric, RecordSet};

/// One year's leader/runner-up gap across all countries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominanceRecord {
    pub year: i32,
    pub leader: String,
    pub runner_up: String,
    pub leader_value: f64,
    pub runner_up_value: f64,
    pub margin: f64,
}

/// One year's gap inside a specific pair of rivals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RivalryRecord {
    pub year: i32,
    /// The unordered pair, stored in ascending name order.
    pub pair: (String, String),
    pub leader: String,
    pub runner_up: String,
    pub leader_value: f64,
    pub runner_up_value: f64,
    pub margin: f64,
}

fn normalized_margin(leader: f64, runner_up: f64) -> f64 {
    let sum = leader + runner_up;
    if sum > 0.0 {
        (leader - runner_up) / sum
    } else {
        0.0
    }
}

/// Per-year top-two margins across the whole table, years ascending.
///
/// A year with fewer than two countries reporting the metric has no
/// meaningful gap and is skipped; this is the non-fatal insufficient-data
/// case, not an error for the whole view.
pub fn market_view(set: &RecordSet, metric: Metric) -> Result<Vec<DominanceRecord>, AnalysisError> {
    if set.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut out = Vec::new();
    for year in set.years() {
        let mut rows: Vec<(&str, f64)> = set
            .records()
            .iter()
            .filter(|r| r.year == year)
            .filter_map(|r| r.value(metric).map(|v| (r.country.as_str(), v)))
            .collect();
        if rows.len() < 2 {
            continue;
        }
        rows.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        let (leader, leader_value) = rows[0];
        let (runner_up, runner_up_value) = rows[1];
        out.push(DominanceRecord {
            year,
            leader: leader.to_string(),
            runner_up: runner_up.to_string(),
            leader_value,
            runner_up_value,
            margin: normalized_margin(leader_value, runner_up_value),
        });
    }
    Ok(out)
}

/// Per-year margins for every unordered pair drawn from `countries`,
/// years ascending, pairs in ascending name order within a year.
///
/// A pair-year is omitted when either country lacks data for that year.
/// Ties assign leader/runner-up lexicographically with margin 0.
pub fn rivalry_view(
    set: &RecordSet,
    metric: Metric,
    countries: &[String],
) -> Result<Vec<RivalryRecord>, AnalysisError> {
    if set.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut selection: Vec<&str> = countries.iter().map(String::as_str).collect();
    selection.sort_unstable();
    selection.dedup();
    if selection.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2,
            got: selection.len(),
        });
    }

    let mut out = Vec::new();
    for year in set.years() {
        let values: BTreeMap<&str, f64> = set
            .records()
            .iter()
            .filter(|r| r.year == year && selection.contains(&r.country.as_str()))
            .filter_map(|r| r.value(metric).map(|v| (r.country.as_str(), v)))
            .collect();

        for (i, a) in selection.iter().enumerate() {
            for b in &selection[i + 1..] {
                let (Some(&value_a), Some(&value_b)) = (values.get(a), values.get(b)) else {
                    continue;
                };
                // Ties go to the lexicographically smaller name, which is
                // `a` since the selection is sorted.
                let (leader, leader_value, runner_up, runner_up_value) = if value_b > value_a {
                    (*b, value_b, *a, value_a)
                } else {
                    (*a, value_a, *b, value_b)
                };
                out.push(RivalryRecord {
                    year,
                    pair: (a.to_string(), b.to_string()),
                    leader: leader.to_string(),
                    runner_up: runner_up.to_string(),
                    leader_value,
                    runner_up_value,
                    margin: normalized_margin(leader_value, runner_up_value),
                });
            }
        }
    }
    Ok(out)
}

/// The `n` records with the widest margins, descending; ties broken by
/// year ascending.
pub fn most_dominant(records: &[DominanceRecord], n: usize) -> Vec<DominanceRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        b.margin
            .partial_cmp(&a.margin)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.year.cmp(&b.year))
    });
    sorted.truncate(n);
    sorted
}
