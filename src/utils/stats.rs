//! Statistical utility functions.
//!
//! All moments are population moments (divisor `n`), matching the
//! conventions used by the Kling-Gupta efficiency.

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the population variance of a slice (divisor `n`).
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / values.len() as f64
}

/// Calculate the population standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Pearson product-moment correlation coefficient.
///
/// Deviations are divided by their largest magnitude before the sums are
/// formed, so the result stays within [-1, 1] for series of any scale.
///
/// Returns NaN for empty or mismatched inputs, and when either series has
/// zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.is_empty() || x.len() != y.len() {
        return f64::NAN;
    }
    let dx = scaled_deviations(x);
    let dy = scaled_deviations(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in dx.iter().zip(dy.iter()) {
        sxy += a * b;
        sxx += a * a;
        syy += b * b;
    }

    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Deviations from the mean divided by the largest absolute deviation.
fn scaled_deviations(values: &[f64]) -> Vec<f64> {
    let m = mean(values);
    let deviations: Vec<f64> = values.iter().map(|v| v - m).collect();
    let scale = deviations.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
    deviations.iter().map(|d| d / scale).collect()
}
