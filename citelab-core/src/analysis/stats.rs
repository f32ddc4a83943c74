//! Shared scalar statistics helpers.

/// Arithmetic mean. 0.0 for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile by linear interpolation between closest ranks.
///
/// `p` is a fraction in [0, 1]. Returns 0.0 for an empty slice.
pub(crate) fn percentile(values: &[f64], p: f64) -> f64 {
    assert!((0.0..=1.0).contains(&p), "percentile must be in [0, 1]");

    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Sample standard deviation (n − 1 denominator). 0.0 for fewer than 2
/// values.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Adjusted Fisher-Pearson sample skewness:
/// G1 = n / ((n−1)(n−2)) · Σ((x − x̄)/s)³.
///
/// 0.0 by convention when n < 3 or the spread is (near) zero, so that the
/// all-identical-values edge case stays error-free downstream.
pub(crate) fn sample_skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let m = mean(values);
    let s = sample_std(values);
    if effectively_zero(s, m) {
        return 0.0;
    }
    let sum_cubed: f64 = values.iter().map(|v| ((v - m) / s).powi(3)).sum();
    let nf = n as f64;
    nf / ((nf - 1.0) * (nf - 2.0)) * sum_cubed
}

/// Whether a spread statistic is zero up to floating-point noise around
/// the column's magnitude.
pub(crate) fn effectively_zero(spread: f64, center: f64) -> bool {
    spread.abs() < 1e-12 * (1.0 + center.abs())
}
