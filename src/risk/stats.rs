//! Sample statistics for simulation output.

use crate::core::types::PercentileBand;

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`). NaN for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Sorted copy of `values`.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    out
}

/// Percentile of already-sorted data, `p` in `[0, 100]`.
///
/// Linear interpolation between the order statistics around rank
/// `p / 100 * (n - 1)`. The result is clamped to its two neighbours so that
/// percentiles are non-decreasing in `p`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lo as f64;

    let (a, b) = (sorted[lo], sorted[hi]);
    (a + (b - a) * frac).max(a).min(b)
}

/// Percentile of unsorted data.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    percentile_sorted(&sorted(values), p)
}

/// p10 / p50 / p90 of already-sorted data.
pub fn band_sorted(sorted: &[f64]) -> PercentileBand {
    PercentileBand {
        p10: percentile_sorted(sorted, 10.0),
        p50: percentile_sorted(sorted, 50.0),
        p90: percentile_sorted(sorted, 90.0),
    }
}

/// Overrun of each sample against `baseline`, in percent.
pub fn overrun_pct(samples: &[f64], baseline: f64) -> Vec<f64> {
    samples
        .iter()
        .map(|x| (x - baseline) / baseline * 100.0)
        .collect()
}
