//! Aggregates over a single telemetry sequence.
//!
//! None of these functions filter `NaN`: a malformed cell upstream turns the
//! aggregate into `NaN`, which is what ends up on screen.

/// Arithmetic mean, `0.0` for an empty sequence.
#[expect(clippy::cast_precision_loss)]
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `N`, not `N - 1`).
pub fn standard_deviation(values: &[f64]) -> f64 {
    let mean = average(values);
    let squared_deviations = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .collect::<Vec<_>>();

    average(&squared_deviations).sqrt()
}

/// `None` when there is no data. Unlike [`f64::min`], a `NaN` anywhere in
/// the sequence yields `NaN`.
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(|acc, value| {
        if acc.is_nan() || value.is_nan() {
            f64::NAN
        } else {
            acc.min(value)
        }
    })
}

/// Same `NaN` propagation as [`min`].
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(|acc, value| {
        if acc.is_nan() || value.is_nan() {
            f64::NAN
        } else {
            acc.max(value)
        }
    })
}
