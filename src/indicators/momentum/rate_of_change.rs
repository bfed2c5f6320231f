//! Percent-change momentum

use crate::common::math;

pub const DEFAULT_MOMENTUM_PERIOD: usize = 5;

/// Fractional price change over the last `period` bars (0.02 = +2%).
pub fn calculate_momentum(closes: &[f64], period: usize) -> Option<f64> {
    math::pct_change(closes, period)
}
