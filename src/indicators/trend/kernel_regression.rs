//! Rational-quadratic kernel regression used as a smoothed trend line.

use serde::{Deserialize, Serialize};

/// Number of trailing closes the estimator looks at.
pub const KERNEL_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelParams {
    /// Bandwidth `h`. Smaller values concentrate weight on the latest bars.
    pub bandwidth: f64,
    /// Shape parameter `r` of the rational-quadratic kernel.
    pub shape: f64,
}

impl KernelParams {
    pub const BASELINE: KernelParams = KernelParams {
        bandwidth: 3.0,
        shape: 15.75,
    };
    pub const FAST: KernelParams = KernelParams {
        bandwidth: 1.0,
        shape: 15.75,
    };
}

/// Kernel weight for a bar `lag` steps back from the latest one:
/// `w(i) = (1 + i² / (2h²r))^(-r)`.
pub fn kernel_weight(lag: usize, params: KernelParams) -> f64 {
    let h = params.bandwidth;
    let r = params.shape;
    let i = lag as f64;
    (1.0 + (i * i) / (2.0 * h * h * r)).powf(-r)
}

/// Weighted average over prices ordered most recent first.
///
/// Only the first [`KERNEL_WINDOW`] prices contribute. With fewer prices the most
/// recent one is returned unweighted. `None` for an empty or non-finite window.
pub fn kernel_estimate(recent_first: &[f64], params: KernelParams) -> Option<f64> {
    let latest = *recent_first.first()?;
    if recent_first.len() < KERNEL_WINDOW {
        return latest.is_finite().then_some(latest);
    }

    let window = &recent_first[..KERNEL_WINDOW];
    if window.iter().any(|p| !p.is_finite()) {
        return None;
    }

    // Anchored on the latest price: algebraically Σw·p / Σw, but exact for flat windows.
    let (weighted, total) = window
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(weighted, total), (lag, price)| {
            let w = kernel_weight(lag, params);
            (weighted + w * (price - latest), total + w)
        });

    Some(latest + weighted / total)
}

/// Kernel estimate of the line at bar `end` of an oldest-first close series.
pub fn kernel_regression_at(closes: &[f64], end: usize, params: KernelParams) -> Option<f64> {
    if end >= closes.len() {
        return None;
    }
    let start = (end + 1).saturating_sub(KERNEL_WINDOW);
    let recent_first: Vec<f64> = closes[start..=end].iter().rev().copied().collect();
    kernel_estimate(&recent_first, params)
}
