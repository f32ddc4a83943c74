//! CiteLab Core — record table, metric registry, and derived-metrics
//! analysis.
//!
//! This crate contains the analysis layer of CiteLab:
//! - Domain types (records, validated record sets, aggregate rows)
//! - Metric registry fixing column headers, labels, and aggregation rules
//! - Input schema contract consulted by the loader
//! - Analysis components: distribution stats with Tukey outliers,
//!   concentration (Pareto/Lorenz) curves, quadrant segmentation,
//!   dominance margins, Pearson correlation, benchmark classification,
//!   trend series
//!
//! Every component is a pure function of a read-only [`RecordSet`];
//! derived values come back as new structures and are never written onto
//! the table.

pub mod aggregate;
pub mod analysis;
pub mod domain;
pub mod schema;

pub use aggregate::{aggregate_by_country, ranked, top_n, AggregateRow};
pub use analysis::benchmark::{
    classify, BenchmarkReport, BenchmarkRow, BenchmarkStatus, GLOBAL_CNCI_BASELINE,
};
pub use analysis::concentration::{ConcentrationCurve, ConcentrationPoint};
pub use analysis::correlation::{pearson, pearson_with, Correlation, StrengthLabel};
pub use analysis::distribution::{DistributionStats, Outlier, OutlierTag, SkewLabel};
pub use analysis::dominance::{
    market_view, most_dominant, rivalry_view, DominanceRecord, RivalryRecord,
};
pub use analysis::quadrant::{Quadrant, QuadrantRow, QuadrantSegmentation};
pub use analysis::trend::{trend_series, TrendPoint, TrendSeries};
pub use analysis::{AnalysisConfig, AnalysisError};
pub use domain::{Aggregation, Country, Metric, Record, RecordSet, RecordSetError};
