//! The metric registry — the one place that fixes each metric's column
//! header, display label, and aggregation rule.
//!
//! Every analysis component consults this registry instead of restating a
//! label→column map or a sum-vs-mean choice at the call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a metric collapses across years when aggregated per country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregation {
    /// Additive counts are summed.
    Sum,
    /// Rates and normalized scores are averaged.
    Mean,
}

/// A metric column of the publication table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Documents,
    TimesCited,
    Cnci,
    CollabCnci,
    PercentDocsCited,
    PercentTopOnePercent,
    PercentTopTenPercent,
}

impl Metric {
    /// All metrics, in canonical column order.
    pub const ALL: [Metric; 7] = [
        Metric::Documents,
        Metric::TimesCited,
        Metric::Cnci,
        Metric::CollabCnci,
        Metric::PercentDocsCited,
        Metric::PercentTopOnePercent,
        Metric::PercentTopTenPercent,
    ];

    /// Column header in the input table.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Documents => "Documents",
            Metric::TimesCited => "Times Cited",
            Metric::Cnci => "CNCI",
            Metric::CollabCnci => "Collab-CNCI",
            Metric::PercentDocsCited => "% Docs Cited",
            Metric::PercentTopOnePercent => "% Documents in Top 1%",
            Metric::PercentTopTenPercent => "% Documents in Top 10%",
        }
    }

    /// Human-readable label for table headers and axis titles.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Documents => "Total Documents",
            Metric::TimesCited => "Times Cited",
            Metric::Cnci => "Quality (CNCI)",
            Metric::CollabCnci => "Collaboration Quality",
            Metric::PercentDocsCited => "% Docs Cited",
            Metric::PercentTopOnePercent => "% in Top 1%",
            Metric::PercentTopTenPercent => "% in Top 10%",
        }
    }

    /// Aggregation rule across years: sum for additive counts, mean for
    /// rates. Fixed here once; every aggregation site applies it.
    pub fn aggregation(self) -> Aggregation {
        match self {
            Metric::Documents | Metric::TimesCited => Aggregation::Sum,
            Metric::Cnci
            | Metric::CollabCnci
            | Metric::PercentDocsCited
            | Metric::PercentTopOnePercent
            | Metric::PercentTopTenPercent => Aggregation::Mean,
        }
    }

    /// Whether the column must be present in every input row.
    /// `% Documents in Top 10%` is the one optional column.
    pub fn is_required(self) -> bool {
        !matches!(self, Metric::PercentTopTenPercent)
    }

    /// CLI-facing name in kebab case.
    pub fn slug(self) -> &'static str {
        match self {
            Metric::Documents => "documents",
            Metric::TimesCited => "times-cited",
            Metric::Cnci => "cnci",
            Metric::CollabCnci => "collab-cnci",
            Metric::PercentDocsCited => "percent-docs-cited",
            Metric::PercentTopOnePercent => "percent-top-1",
            Metric::PercentTopTenPercent => "percent-top-10",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = String;

    /// Accepts the kebab-case slug, the column header, or the display
    /// label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| {
                wanted == m.slug()
                    || wanted == m.column().to_ascii_lowercase()
                    || wanted == m.label().to_ascii_lowercase()
            })
            .ok_or_else(|| {
                let known: Vec<&str> = Metric::ALL.iter().map(|m| m.slug()).collect();
                format!("unknown metric '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
