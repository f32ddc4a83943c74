//! CiteLab CLI — research-publication analytics views over a CSV table.
//!
//! Views (one subcommand each, `report` runs them all):
//! - `overview` — concentration curve plus benchmark classification
//! - `quadrant` — strategic positioning against cross-country medians
//! - `spectrum` — top-N countries by an aggregated metric
//! - `dominance` — leader vs runner-up margin per year
//! - `rivalry` — pairwise margins for selected countries
//! - `outliers` — distribution statistics and Tukey outliers
//! - `correlation` — Pearson r between two metrics
//! - `trends` — year-by-year series for selected countries
//!
//! Load-time validation errors are fatal; per-view analysis errors only
//! degrade that view, the rest still render.

mod demo;
mod loader;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use citelab_core::{
    classify, market_view, most_dominant, pearson_with, rivalry_view, top_n, trend_series,
    Aggregation, AnalysisConfig, AnalysisError, BenchmarkStatus, ConcentrationCurve,
    DistributionStats, Metric, OutlierTag, Quadrant, QuadrantSegmentation, RecordSet, SkewLabel,
    StrengthLabel, GLOBAL_CNCI_BASELINE,
};

/// Seed tag for the deterministic demo table.
const DEMO_SEED_TAG: &str = "citelab-demo";

#[derive(Parser)]
#[command(
    name = "citelab",
    about = "CiteLab — research-publication performance analytics"
)]
struct Cli {
    /// Path to the publications CSV.
    #[arg(long, global = true, default_value = "data/cleaned_publications.csv")]
    data: PathBuf,

    /// Use the generated demo table instead of reading a CSV.
    #[arg(long, global = true, default_value_t = false)]
    demo: bool,

    /// TOML file overriding the analysis policy constants.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of text tables.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Concentration curve plus benchmark classification.
    Overview {
        /// Metric for the concentration curve.
        #[arg(long, default_value = "times-cited")]
        metric: Metric,
    },
    /// Strategic positioning: quadrants against cross-country medians.
    Quadrant {
        /// Metric on the x axis.
        #[arg(long, default_value = "documents")]
        x: Metric,

        /// Metric on the y axis.
        #[arg(long, default_value = "cnci")]
        y: Metric,
    },
    /// Top-N countries by an aggregated metric.
    Spectrum {
        #[arg(long, default_value = "percent-docs-cited")]
        metric: Metric,

        /// Number of countries to show.
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Leader vs runner-up margin per year.
    Dominance {
        #[arg(long, default_value = "times-cited")]
        metric: Metric,

        /// Rows in the most-dominant-years table.
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Pairwise margins between selected countries.
    Rivalry {
        #[arg(long, default_value = "times-cited")]
        metric: Metric,

        /// Countries to compare (two or more).
        #[arg(required = true, num_args = 2..)]
        countries: Vec<String>,
    },
    /// Distribution statistics and Tukey outliers.
    Outliers {
        #[arg(long, default_value = "documents")]
        metric: Metric,
    },
    /// Pearson correlation between two metrics.
    Correlation {
        #[arg(long, default_value = "collab-cnci")]
        x: Metric,

        #[arg(long, default_value = "cnci")]
        y: Metric,
    },
    /// Year-by-year series for selected countries.
    Trends {
        #[arg(long, default_value = "documents")]
        metric: Metric,

        /// Countries to plot. Defaults to the top five by the metric.
        countries: Vec<String>,
    },
    /// All views in sequence.
    Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let set = load_data(&cli)?;
    let text = !cli.json;

    let value = match cli.command {
        Commands::Overview { metric } => run_overview(&set, &config, metric, text),
        Commands::Quadrant { x, y } => run_quadrant(&set, x, y, text),
        Commands::Spectrum { metric, top } => run_spectrum(&set, metric, top, text),
        Commands::Dominance { metric, top } => run_dominance(&set, metric, top, text),
        Commands::Rivalry { metric, countries } => run_rivalry(&set, metric, &countries, text),
        Commands::Outliers { metric } => run_outliers(&set, &config, metric, text),
        Commands::Correlation { x, y } => run_correlation(&set, &config, x, y, text),
        Commands::Trends { metric, countries } => run_trends(&set, metric, countries, text),
        Commands::Report => run_report(&set, &config, text),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

// ─── Data and config loading ────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        None => Ok(AnalysisConfig::default()),
        Some(p) => {
            let content = std::fs::read_to_string(p)
                .with_context(|| format!("cannot read config '{}'", p.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("invalid analysis config '{}'", p.display()))
        }
    }
}

fn load_data(cli: &Cli) -> Result<RecordSet> {
    if cli.demo {
        return Ok(demo::demo_record_set(DEMO_SEED_TAG));
    }
    if cli.data.exists() {
        loader::load_csv(&cli.data)
            .with_context(|| format!("failed to load '{}'", cli.data.display()))
    } else {
        eprintln!(
            "WARNING: '{}' not found — using generated demo data",
            cli.data.display()
        );
        Ok(demo::demo_record_set(DEMO_SEED_TAG))
    }
}

// ─── View helpers ───────────────────────────────────────────────────

fn view_json<T: Serialize>(result: &Result<T, AnalysisError>) -> Value {
    match result {
        Ok(v) => serde_json::to_value(v).unwrap_or(Value::Null),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

fn note(err: &AnalysisError) {
    println!("  ({err})");
}

/// Counts print whole, rates with two decimals, per the metric's
/// aggregation rule.
fn fmt_value(metric: Metric, value: f64) -> String {
    match metric.aggregation() {
        Aggregation::Sum => render::count(value),
        Aggregation::Mean => render::num(value),
    }
}

fn quadrant_name(quadrant: Quadrant) -> &'static str {
    match quadrant {
        Quadrant::HighHigh => "High / High",
        Quadrant::HighLow => "High / Low",
        Quadrant::LowHigh => "Low / High",
        Quadrant::LowLow => "Low / Low",
    }
}

/// The strategy reading of the quadrants for the volume-vs-quality matrix.
fn strategy_name(quadrant: Quadrant) -> &'static str {
    match quadrant {
        Quadrant::HighHigh => "Consistent Elite",
        Quadrant::HighLow => "Mass Producers",
        Quadrant::LowHigh => "Niche / Boutique",
        Quadrant::LowLow => "Lagging",
    }
}

fn skew_text(label: SkewLabel) -> &'static str {
    match label {
        SkewLabel::Symmetric => "symmetric",
        SkewLabel::RightSkewed => "right-skewed",
        SkewLabel::LeftSkewed => "left-skewed",
    }
}

fn strength_text(label: StrengthLabel) -> &'static str {
    match label {
        StrengthLabel::Strong => "strong",
        StrengthLabel::Moderate => "moderate",
        StrengthLabel::Weak => "weak",
    }
}

// ─── Views ──────────────────────────────────────────────────────────

fn run_overview(set: &RecordSet, config: &AnalysisConfig, metric: Metric, text: bool) -> Value {
    let curve = ConcentrationCurve::compute_with(set, metric, config);
    let benchmark = classify(set, Metric::Cnci, GLOBAL_CNCI_BASELINE);

    if text {
        println!("Concentration — {}", metric.label());
        match &curve {
            Ok(c) if c.points.is_empty() => {
                println!("  no meaningful concentration: the total is zero (cutoff 100%)");
            }
            Ok(c) => {
                println!(
                    "  countries needed for {} of the total: {}",
                    render::percent(config.concentration_target_share),
                    render::percent(c.cutoff_entity_fraction)
                );
                let rows: Vec<Vec<String>> = c
                    .points
                    .iter()
                    .map(|p| {
                        vec![
                            p.country.clone(),
                            fmt_value(metric, p.value),
                            render::percent(p.cumulative_share),
                            render::percent(p.entity_fraction),
                        ]
                    })
                    .collect();
                print!(
                    "{}",
                    render::table(&[
                        "Country",
                        metric.label(),
                        "Cumulative",
                        "Entities"
                    ], &rows)
                );
            }
            Err(e) => note(e),
        }

        println!();
        println!("Benchmark — CNCI vs global baseline {GLOBAL_CNCI_BASELINE:.1}");
        match &benchmark {
            Ok(b) => {
                println!("  below baseline: {} / {} observations", b.below_count, b.total);
                let below: Vec<Vec<String>> = b
                    .rows
                    .iter()
                    .filter(|r| r.status == BenchmarkStatus::Below)
                    .map(|r| {
                        vec![
                            r.country.clone(),
                            r.year.to_string(),
                            render::num(r.value),
                        ]
                    })
                    .collect();
                if !below.is_empty() {
                    print!("{}", render::table(&["Country", "Year", "CNCI"], &below));
                }
            }
            Err(e) => note(e),
        }
    }

    json!({
        "concentration": view_json(&curve),
        "benchmark": view_json(&benchmark),
    })
}

fn run_quadrant(set: &RecordSet, x: Metric, y: Metric, text: bool) -> Value {
    let segmentation = QuadrantSegmentation::compute(set, x, y);

    if text {
        println!("Strategic positioning — x: {}, y: {}", x.label(), y.label());
        match &segmentation {
            Ok(s) => {
                println!(
                    "  median x: {}, median y: {}",
                    fmt_value(x, s.median_x),
                    fmt_value(y, s.median_y)
                );
                let strategic = x == Metric::Documents && y == Metric::Cnci;
                let rows: Vec<Vec<String>> = s
                    .rows
                    .iter()
                    .map(|r| {
                        vec![
                            r.country.clone(),
                            fmt_value(x, r.x_value),
                            fmt_value(y, r.y_value),
                            if strategic {
                                strategy_name(r.quadrant).to_string()
                            } else {
                                quadrant_name(r.quadrant).to_string()
                            },
                        ]
                    })
                    .collect();
                print!(
                    "{}",
                    render::table(&["Country", x.label(), y.label(), "Quadrant"], &rows)
                );
            }
            Err(e) => note(e),
        }
    }

    view_json(&segmentation)
}

fn run_spectrum(set: &RecordSet, metric: Metric, top: usize, text: bool) -> Value {
    let rows = top_n(set, metric, top);

    if text {
        println!("Top {} — {}", top, metric.label());
        if rows.is_empty() {
            note(&AnalysisError::EmptyInput);
        } else {
            let table_rows: Vec<Vec<String>> = rows
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    vec![
                        (i + 1).to_string(),
                        r.country.clone(),
                        fmt_value(metric, r.value),
                    ]
                })
                .collect();
            print!(
                "{}",
                render::table(&["Rank", "Country", metric.label()], &table_rows)
            );
        }
    }

    serde_json::to_value(&rows).unwrap_or(Value::Null)
}

fn run_dominance(set: &RecordSet, metric: Metric, top: usize, text: bool) -> Value {
    let view = market_view(set, metric);

    if text {
        println!("Dominance gap — {}", metric.label());
        match &view {
            Ok(records) if records.is_empty() => {
                println!("  (insufficient data: no year has two reporting countries)");
            }
            Ok(records) => {
                let rows: Vec<Vec<String>> = records
                    .iter()
                    .map(|d| {
                        vec![
                            d.year.to_string(),
                            d.leader.clone(),
                            d.runner_up.clone(),
                            render::percent(d.margin),
                        ]
                    })
                    .collect();
                print!(
                    "{}",
                    render::table(&["Year", "Leader", "Runner-up", "Margin"], &rows)
                );

                let strongest = most_dominant(records, top);
                println!();
                println!("Most dominant years");
                let rows: Vec<Vec<String>> = strongest
                    .iter()
                    .map(|d| {
                        vec![
                            d.year.to_string(),
                            d.leader.clone(),
                            d.runner_up.clone(),
                            render::percent(d.margin),
                        ]
                    })
                    .collect();
                print!(
                    "{}",
                    render::table(&["Year", "Leader", "Runner-up", "Margin"], &rows)
                );
            }
            Err(e) => note(e),
        }
    }

    view_json(&view)
}

fn run_rivalry(set: &RecordSet, metric: Metric, countries: &[String], text: bool) -> Value {
    let view = rivalry_view(set, metric, countries);

    if text {
        println!("Rivalry — {} ({})", metric.label(), countries.join(", "));
        match &view {
            Ok(records) if records.is_empty() => {
                println!("  (insufficient data: no year covers any selected pair)");
            }
            Ok(records) => {
                let rows: Vec<Vec<String>> = records
                    .iter()
                    .map(|r| {
                        vec![
                            r.year.to_string(),
                            format!("{} vs {}", r.pair.0, r.pair.1),
                            r.leader.clone(),
                            render::percent(r.margin),
                        ]
                    })
                    .collect();
                print!(
                    "{}",
                    render::table(&["Year", "Pair", "Leader", "Margin"], &rows)
                );
            }
            Err(e) => note(e),
        }
    }

    view_json(&view)
}

fn run_outliers(set: &RecordSet, config: &AnalysisConfig, metric: Metric, text: bool) -> Value {
    let stats = DistributionStats::compute_with(set, metric, config);

    if text {
        println!("Distribution — {}", metric.label());
        match &stats {
            Ok(s) => {
                println!("  mean {}, median {}", render::num(s.mean), render::num(s.median));
                println!(
                    "  skewness {} ({})",
                    render::num(s.skewness),
                    skew_text(s.skew_label)
                );
                println!(
                    "  q1 {}, q3 {}, iqr {}, fences [{}, {}]",
                    render::num(s.q1),
                    render::num(s.q3),
                    render::num(s.iqr),
                    render::num(s.lower_bound),
                    render::num(s.upper_bound)
                );
                if s.outliers.is_empty() {
                    println!("  no outliers — all values inside the fences");
                } else {
                    let rows: Vec<Vec<String>> = s
                        .outliers
                        .iter()
                        .map(|o| {
                            vec![
                                o.country.clone(),
                                o.year.to_string(),
                                fmt_value(metric, o.value),
                                match o.tag {
                                    OutlierTag::Low => "low".to_string(),
                                    OutlierTag::High => "high".to_string(),
                                },
                            ]
                        })
                        .collect();
                    print!(
                        "{}",
                        render::table(&["Country", "Year", metric.label(), "Tag"], &rows)
                    );
                }
            }
            Err(e) => note(e),
        }
    }

    view_json(&stats)
}

fn run_correlation(
    set: &RecordSet,
    config: &AnalysisConfig,
    x: Metric,
    y: Metric,
    text: bool,
) -> Value {
    let correlation = pearson_with(set, x, y, config);

    if text {
        println!("Correlation — {} vs {}", x.label(), y.label());
        match &correlation {
            Ok(c) => println!(
                "  r = {:.4} ({}, n = {})",
                c.r,
                strength_text(c.strength),
                c.n
            ),
            Err(AnalysisError::InsufficientVariance { column }) => {
                println!("  r = undefined — '{column}' has zero variance");
            }
            Err(e) => note(e),
        }
    }

    view_json(&correlation)
}

fn run_trends(set: &RecordSet, metric: Metric, countries: Vec<String>, text: bool) -> Value {
    let selection: Vec<String> = if countries.is_empty() {
        top_n(set, metric, 5).into_iter().map(|r| r.country).collect()
    } else {
        countries
    };
    let series = trend_series(set, metric, &selection);

    if text {
        println!("Trends — {} ({})", metric.label(), selection.join(", "));
        match &series {
            Ok(all) => {
                for s in all {
                    println!("  {}", s.country);
                    let rows: Vec<Vec<String>> = s
                        .points
                        .iter()
                        .map(|p| vec![p.year.to_string(), fmt_value(metric, p.value)])
                        .collect();
                    print!("{}", render::table(&["Year", metric.label()], &rows));
                }
            }
            Err(e) => note(e),
        }
    }

    view_json(&series)
}

fn run_report(set: &RecordSet, config: &AnalysisConfig, text: bool) -> Value {
    let divider = || {
        if text {
            println!();
            println!("{}", "─".repeat(60));
            println!();
        }
    };

    let overview = run_overview(set, config, Metric::TimesCited, text);
    divider();
    let quadrant = run_quadrant(set, Metric::Documents, Metric::Cnci, text);
    divider();
    let relevance = run_spectrum(set, Metric::PercentDocsCited, 10, text);
    if text {
        println!();
    }
    let excellence = run_spectrum(set, Metric::PercentTopOnePercent, 10, text);
    divider();
    let dominance = run_dominance(set, Metric::TimesCited, 5, text);
    divider();
    let outliers = run_outliers(set, config, Metric::Documents, text);
    divider();
    let weak = run_correlation(set, config, Metric::CollabCnci, Metric::Cnci, text);
    if text {
        println!();
    }
    let strong = run_correlation(set, config, Metric::Documents, Metric::TimesCited, text);
    divider();
    let trends = run_trends(set, Metric::Documents, Vec::new(), text);

    json!({
        "overview": overview,
        "quadrant": quadrant,
        "quality_spectrum": { "relevance": relevance, "excellence": excellence },
        "dominance": dominance,
        "outliers": outliers,
        "correlation": { "collab_vs_quality": weak, "volume_vs_impact": strong },
        "trends": trends,
    })
}
