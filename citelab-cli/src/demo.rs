//! Synthetic demo data — the fallback when the publications CSV is
//! missing.
//!
//! Produces a structurally valid table with statistically plausible
//! values, so the analysis layer never receives a malformed input. The
//! RNG seed is derived from a fixed tag via BLAKE3, making repeated runs
//! identical.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use citelab_core::{Record, RecordSet};

const DEMO_COUNTRIES: [&str; 15] = [
    "USA",
    "China",
    "UK",
    "Germany",
    "India",
    "Japan",
    "France",
    "Italy",
    "Canada",
    "Australia",
    "Brazil",
    "Spain",
    "South Korea",
    "Netherlands",
    "Russia",
];

const DEMO_YEARS: [i32; 5] = [2018, 2019, 2020, 2021, 2022];

/// Generate the demo RecordSet.
///
/// Each country gets a base quality level; yearly CNCI wobbles around it,
/// citations scale with documents × CNCI, and the two volume giants get a
/// 5× document boost.
pub fn demo_record_set(seed_tag: &str) -> RecordSet {
    let seed: [u8; 32] = *blake3::hash(seed_tag.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut records = Vec::with_capacity(DEMO_COUNTRIES.len() * DEMO_YEARS.len());
    for country in DEMO_COUNTRIES {
        let base_quality: f64 = rng.gen_range(0.8..1.8);
        for year in DEMO_YEARS {
            let mut documents = rng.gen_range(500..20_000) as f64;
            if matches!(country, "USA" | "China") {
                documents *= 5.0;
            }

            let cnci = (base_quality + rng.gen_range(-0.1..0.1)).max(0.05);
            let times_cited = (documents * cnci * rng.gen_range(5.0..15.0)).round();
            let collab_cnci = cnci * rng.gen_range(0.9..1.3);
            let percent_docs_cited = rng.gen_range(40.0..90.0);
            let percent_top_one_percent = rng.gen_range(0.2..3.0);
            let percent_top_ten_percent = Some(percent_top_one_percent * rng.gen_range(4.0..8.0));

            records.push(Record {
                country: country.to_string(),
                year,
                documents,
                times_cited,
                cnci,
                collab_cnci,
                percent_docs_cited,
                percent_top_one_percent,
                percent_top_ten_percent,
            });
        }
    }

    RecordSet::new(records).expect("demo data violates record-set invariants")
}

#[cfg(test)]
mod tests {
    use super::*;
    use citelab_core::schema;
    use citelab_core::Metric;

    #[test]
    fn demo_data_is_deterministic() {
        let a = demo_record_set("citelab-demo");
        let b = demo_record_set("citelab-demo");
        assert_eq!(a, b);
    }

    #[test]
    fn different_tags_give_different_data() {
        let a = demo_record_set("citelab-demo");
        let b = demo_record_set("other-tag");
        assert_ne!(a, b);
    }

    #[test]
    fn demo_data_covers_all_countries_and_years() {
        let set = demo_record_set("citelab-demo");
        assert_eq!(set.len(), 75);
        assert_eq!(set.countries().len(), 15);
        assert_eq!(set.years(), vec![2018, 2019, 2020, 2021, 2022]);
    }

    #[test]
    fn demo_data_satisfies_the_schema_contract() {
        let set = demo_record_set("citelab-demo");
        for metric in Metric::ALL {
            // Every record carries every column, optional one included.
            assert_eq!(set.metric_values(metric).len(), set.len(), "{metric:?}");
        }
        // The contract's required headers are exactly the ones the loader
        // would demand of a CSV carrying this table.
        assert!(schema::validate_headers(&schema::required_columns()).is_valid);
    }

    #[test]
    fn demo_values_are_plausible() {
        let set = demo_record_set("citelab-demo");
        for record in set.records() {
            assert!(record.documents >= 500.0);
            assert!(record.times_cited >= 0.0);
            assert!(record.cnci > 0.0);
            assert!((40.0..90.0).contains(&record.percent_docs_cited));
            assert!(record.percent_top_one_percent >= 0.2);
        }
    }
}
