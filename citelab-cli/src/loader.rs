//! CSV loading for the publication table.
//!
//! Validates the header row against the schema contract, parses numeric
//! columns with row/column context, and hands back a validated
//! [`RecordSet`]. Load-time failures are fatal for the dataset; there is
//! no partial load.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use citelab_core::schema::{self, COUNTRY_COLUMN, YEAR_COLUMN};
use citelab_core::{Metric, Record, RecordSet, RecordSetError};

/// Errors from the CSV loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column(s): {columns}")]
    MissingColumns { columns: String },

    #[error("row {row}: missing value for column '{column}'")]
    MissingValue { row: usize, column: String },

    #[error("row {row}: column '{column}' is not numeric: '{value}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: year is not an integer: '{value}'")]
    InvalidYear { row: usize, value: String },

    #[error(transparent)]
    InvalidRecordSet(#[from] RecordSetError),
}

/// Load a RecordSet from a headered CSV file.
pub fn load_csv(path: &Path) -> Result<RecordSet, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let header_fields: Vec<&str> = headers.iter().collect();
    let validation = schema::validate_headers(&header_fields);
    if !validation.is_valid {
        return Err(LoadError::MissingColumns {
            columns: validation.missing.join(", "),
        });
    }

    let index: HashMap<&str, usize> = header_fields
        .iter()
        .enumerate()
        .map(|(i, h)| (*h, i))
        .collect();
    // Validated above for every required column.
    let column_at = |name: &str| index[name];
    let top_ten_index = index.get(Metric::PercentTopTenPercent.column()).copied();

    let mut records = Vec::new();
    for (i, row_result) in reader.records().enumerate() {
        // 1-based, counting the header line.
        let row = i + 2;
        let fields = row_result?;
        let field = |idx: usize| fields.get(idx).unwrap_or("").trim();

        let country = field(column_at(COUNTRY_COLUMN)).to_string();

        let year_text = field(column_at(YEAR_COLUMN));
        let year: i32 = year_text.parse().map_err(|_| LoadError::InvalidYear {
            row,
            value: year_text.to_string(),
        })?;

        let numeric = |metric: Metric| -> Result<f64, LoadError> {
            let text = field(column_at(metric.column()));
            if text.is_empty() {
                return Err(LoadError::MissingValue {
                    row,
                    column: metric.column().to_string(),
                });
            }
            text.parse().map_err(|_| LoadError::InvalidNumber {
                row,
                column: metric.column().to_string(),
                value: text.to_string(),
            })
        };

        // Optional column: absent header or blank cell both mean "not
        // reported", but a non-empty malformed cell is still an error.
        let percent_top_ten_percent = match top_ten_index {
            Some(idx) => {
                let text = field(idx);
                if text.is_empty() {
                    None
                } else {
                    Some(text.parse().map_err(|_| LoadError::InvalidNumber {
                        row,
                        column: Metric::PercentTopTenPercent.column().to_string(),
                        value: text.to_string(),
                    })?)
                }
            }
            None => None,
        };

        records.push(Record {
            country,
            year,
            documents: numeric(Metric::Documents)?,
            times_cited: numeric(Metric::TimesCited)?,
            cnci: numeric(Metric::Cnci)?,
            collab_cnci: numeric(Metric::CollabCnci)?,
            percent_docs_cited: numeric(Metric::PercentDocsCited)?,
            percent_top_one_percent: numeric(Metric::PercentTopOnePercent)?,
            percent_top_ten_percent,
        });
    }

    Ok(RecordSet::new(records)?)
}
