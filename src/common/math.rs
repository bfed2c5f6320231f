//! Windowed statistics over price slices.
//!
//! All helpers look at the trailing `period` values and return `None` when the
//! slice is too short or the window contains a non-finite value.

fn trailing(values: &[f64], period: usize) -> Option<&[f64]> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    window.iter().all(|v| v.is_finite()).then_some(window)
}

/// Simple moving average of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    let window = trailing(values, period)?;
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Sample standard deviation (n - 1 denominator) of the trailing `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period < 2 {
        return None;
    }
    let window = trailing(values, period)?;
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (period - 1) as f64;
    Some(variance.sqrt())
}

/// Fractional change between the latest value and the one `lag` steps earlier.
pub fn pct_change(values: &[f64], lag: usize) -> Option<f64> {
    if lag == 0 || values.len() <= lag {
        return None;
    }
    let current = *values.last()?;
    let base = values[values.len() - 1 - lag];
    if !current.is_finite() || !base.is_finite() || base == 0.0 {
        return None;
    }
    Some(current / base - 1.0)
}
