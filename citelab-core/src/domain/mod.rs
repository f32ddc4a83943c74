//! Domain types for CiteLab.

pub mod metric;
pub mod record;

pub use metric::{Aggregation, Metric};
pub use record::{Record, RecordSet, RecordSetError};

/// Country name type alias
pub type Country = String;
