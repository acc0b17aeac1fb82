//! Global field statistics.
use crate::image::ImageF32;

const RANGE_EPS: f32 = 1e-9;

/// Linear rescale to [0, 1] using the global min/max.
///
/// A range below `1e-9` uses a denominator of 1, so constant fields collapse to 0.
pub fn normalize01(field: &ImageF32) -> ImageF32 {
    let (lo, hi) = min_max(&field.data);
    let range = hi - lo;
    let denom = if range < RANGE_EPS { 1.0 } else { range };
    field.map(|v| (v - lo) / denom)
}

/// Nearest-rank percentile on a sorted copy: index `clamp(floor(p/100·n), 0, n−1)`.
///
/// Returns `0.0` for an empty slice.
pub fn percentile(values: &[f32], p: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    let n = sorted.len();
    let idx = ((p / 100.0) * n as f32).floor();
    let idx = if idx.is_nan() || idx < 0.0 {
        0
    } else {
        (idx as usize).min(n - 1)
    };
    sorted[idx]
}

/// Arithmetic mean accumulated in f64, `0.0` for an empty slice.
pub fn mean(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Subtract the mean and divide by the sample standard deviation (n − 1).
///
/// A zero (or undefined) standard deviation is treated as 1.
pub fn zscore(field: &ImageF32) -> ImageF32 {
    let n = field.data.len();
    let mu = mean(&field.data);
    let sd = if n > 1 {
        let ss: f64 = field
            .data
            .iter()
            .map(|&v| {
                let d = v as f64 - mu;
                d * d
            })
            .sum();
        (ss / (n - 1) as f64).sqrt()
    } else {
        0.0
    };
    let sd = if sd > 0.0 { sd } else { 1.0 };
    field.map(|v| ((v as f64 - mu) / sd) as f32)
}

pub(crate) fn min_max(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
