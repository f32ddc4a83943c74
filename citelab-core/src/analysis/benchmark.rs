//! Benchmark classification: tag every observation as above or below a
//! fixed baseline for one metric.
//!
//! The classification is returned as a fresh structure; it is never
//! written back onto the record set as a status column.

use serde::Serialize;

use super::AnalysisError;
use crate::domain::{Metric, RecordSet};

/// The CNCI value representing the global average.
pub const GLOBAL_CNCI_BASELINE: f64 = 1.0;

/// Side of the baseline. Values exactly at the baseline count as Above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BenchmarkStatus {
    Above,
    Below,
}

/// One observation's classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRow {
    pub country: String,
    pub year: i32,
    pub value: f64,
    pub status: BenchmarkStatus,
}

/// Classification of every observation against the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub baseline: f64,
    pub below_count: usize,
    pub total: usize,
    pub rows: Vec<BenchmarkRow>,
}

/// Classify each record's value of `metric` against `baseline`.
pub fn classify(
    set: &RecordSet,
    metric: Metric,
    baseline: f64,
) -> Result<BenchmarkReport, AnalysisError> {
    let rows: Vec<BenchmarkRow> = set
        .records()
        .iter()
        .filter_map(|record| {
            record.value(metric).map(|value| BenchmarkRow {
                country: record.country.clone(),
                year: record.year,
                value,
                status: if value < baseline {
                    BenchmarkStatus::Below
                } else {
                    BenchmarkStatus::Above
                },
            })
        })
        .collect();
    if rows.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let below_count = rows
        .iter()
        .filter(|r| r.status == BenchmarkStatus::Below)
        .count();
    Ok(BenchmarkReport {
        baseline,
        below_count,
        total: rows.len(),
        rows,
    })
}
