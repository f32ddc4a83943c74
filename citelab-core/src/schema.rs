//! Tabular schema contract — the boundary between the loader and the
//! analysis layer.
//!
//! Defines the exact column headers the input table must carry. The loader
//! validates a header row against this contract before parsing records, so
//! the analysis layer never sees a table with missing columns.

use crate::domain::Metric;

/// Column header for the entity (country) column.
pub const COUNTRY_COLUMN: &str = "Country";

/// Column header for the period (year) column.
pub const YEAR_COLUMN: &str = "Year";

/// Headers that must be present: Country, Year, and every required metric.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![COUNTRY_COLUMN, YEAR_COLUMN];
    columns.extend(
        Metric::ALL
            .iter()
            .filter(|m| m.is_required())
            .map(|m| m.column()),
    );
    columns
}

/// Result of header validation.
#[derive(Debug, Clone)]
pub struct SchemaValidation {
    pub is_valid: bool,
    /// Required columns absent from the header row.
    pub missing: Vec<&'static str>,
}

/// Validate a header row against the schema contract.
///
/// Extra columns are allowed; only absence of a required column fails.
pub fn validate_headers(headers: &[&str]) -> SchemaValidation {
    let missing: Vec<&'static str> = required_columns()
        .into_iter()
        .filter(|required| !headers.contains(required))
        .collect();
    SchemaValidation {
        is_valid: missing.is_empty(),
        missing,
    }
}
