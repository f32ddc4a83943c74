//! Record and RecordSet — the raw observation table.
//!
//! A [`RecordSet`] is validated once at construction and read-only
//! afterwards. Analysis components never write derived columns back onto
//! it; everything derived is returned as a new structure.

use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

use super::metric::Metric;

/// Errors from [`RecordSet`] construction. Fatal for the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordSetError {
    #[error("record {index} has an empty country name")]
    EmptyCountry { index: usize },

    #[error("duplicate observation for {country} in {year}")]
    DuplicateObservation { country: String, year: i32 },
}

/// One observation: a country's metric values for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub country: String,
    pub year: i32,
    pub documents: f64,
    pub times_cited: f64,
    pub cnci: f64,
    pub collab_cnci: f64,
    pub percent_docs_cited: f64,
    pub percent_top_one_percent: f64,
    /// Optional column; not every export carries it.
    pub percent_top_ten_percent: Option<f64>,
}

impl Record {
    /// Value of `metric` on this record. `None` only when the optional
    /// column is absent.
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Documents => Some(self.documents),
            Metric::TimesCited => Some(self.times_cited),
            Metric::Cnci => Some(self.cnci),
            Metric::CollabCnci => Some(self.collab_cnci),
            Metric::PercentDocsCited => Some(self.percent_docs_cited),
            Metric::PercentTopOnePercent => Some(self.percent_top_one_percent),
            Metric::PercentTopTenPercent => self.percent_top_ten_percent,
        }
    }
}

/// The in-memory observation table.
///
/// Invariants, enforced by [`RecordSet::new`]:
/// - at most one record per (country, year) pair
/// - country names are non-empty
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Build a set, rejecting empty country names and duplicate
    /// (country, year) observations.
    pub fn new(records: Vec<Record>) -> Result<Self, RecordSetError> {
        let mut seen: BTreeSet<(&str, i32)> = BTreeSet::new();
        for (index, record) in records.iter().enumerate() {
            if record.country.trim().is_empty() {
                return Err(RecordSetError::EmptyCountry { index });
            }
            if !seen.insert((record.country.as_str(), record.year)) {
                return Err(RecordSetError::DuplicateObservation {
                    country: record.country.clone(),
                    year: record.year,
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct country names, ascending.
    pub fn countries(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self.records.iter().map(|r| r.country.as_str()).collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }

    /// A new set restricted to the given countries. A subset of a valid
    /// set cannot violate the construction invariants.
    pub fn filter_countries(&self, countries: &[String]) -> RecordSet {
        let keep: BTreeSet<&str> = countries.iter().map(String::as_str).collect();
        RecordSet {
            records: self
                .records
                .iter()
                .filter(|r| keep.contains(r.country.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Values of `metric` across all records that carry it.
    pub fn metric_values(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.value(metric)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: i32, documents: f64) -> Record {
        Record {
            country: country.to_string(),
            year,
            documents,
            times_cited: documents * 10.0,
            cnci: 1.2,
            collab_cnci: 1.3,
            percent_docs_cited: 80.0,
            percent_top_one_percent: 1.5,
            percent_top_ten_percent: None,
        }
    }

    // ── Construction ──

    #[test]
    fn accepts_unique_observations() {
        let set = RecordSet::new(vec![
            record("Alpha", 2020, 100.0),
            record("Alpha", 2021, 120.0),
            record("Beta", 2020, 300.0),
        ])
        .unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn rejects_duplicate_country_year() {
        let err = RecordSet::new(vec![
            record("Alpha", 2020, 100.0),
            record("Alpha", 2020, 200.0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RecordSetError::DuplicateObservation {
                country: "Alpha".to_string(),
                year: 2020,
            }
        );
    }

    #[test]
    fn rejects_empty_country_name() {
        let err = RecordSet::new(vec![record("  ", 2020, 100.0)]).unwrap_err();
        assert_eq!(err, RecordSetError::EmptyCountry { index: 0 });
    }

    #[test]
    fn empty_set_is_valid() {
        let set = RecordSet::new(vec![]).unwrap();
        assert!(set.is_empty());
        assert!(set.countries().is_empty());
        assert!(set.years().is_empty());
    }

    // ── Accessors ──

    #[test]
    fn countries_and_years_are_sorted_and_distinct() {
        let set = RecordSet::new(vec![
            record("Beta", 2021, 1.0),
            record("Alpha", 2020, 1.0),
            record("Beta", 2020, 1.0),
        ])
        .unwrap();
        assert_eq!(set.countries(), vec!["Alpha", "Beta"]);
        assert_eq!(set.years(), vec![2020, 2021]);
    }

    #[test]
    fn filter_countries_keeps_only_selection() {
        let set = RecordSet::new(vec![
            record("Alpha", 2020, 1.0),
            record("Beta", 2020, 2.0),
            record("Gamma", 2020, 3.0),
        ])
        .unwrap();
        let filtered = set.filter_countries(&["Beta".to_string(), "Gamma".to_string()]);
        assert_eq!(filtered.countries(), vec!["Beta", "Gamma"]);
    }

    #[test]
    fn metric_values_skip_absent_optional_column() {
        let mut with_top_ten = record("Alpha", 2020, 1.0);
        with_top_ten.percent_top_ten_percent = Some(9.0);
        let set = RecordSet::new(vec![with_top_ten, record("Beta", 2020, 2.0)]).unwrap();

        assert_eq!(set.metric_values(Metric::Documents).len(), 2);
        assert_eq!(set.metric_values(Metric::PercentTopTenPercent), vec![9.0]);
    }
}
