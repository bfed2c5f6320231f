//! Kernel-regression crossover (crypto)

use crate::indicators::trend::{kernel_regression_at, KernelParams};
use crate::models::{Observation, Signal};
use crate::strategies::{usable_closes, Strategy};

/// Rolling window plus the prior bar for cross detection, with margin.
pub const KERNEL_CROSSOVER_MIN_OBSERVATIONS: usize = 10;

/// Fires when the fast kernel line crosses the baseline line between the
/// previous and the current bar. Edge-triggered: staying on one side is silent.
#[derive(Debug, Clone)]
pub struct KernelCrossoverStrategy {
    pub baseline: KernelParams,
    pub fast: KernelParams,
}

impl Default for KernelCrossoverStrategy {
    fn default() -> Self {
        Self {
            baseline: KernelParams::BASELINE,
            fast: KernelParams::FAST,
        }
    }
}

impl KernelCrossoverStrategy {
    /// (fast, baseline) line values at bar `index`.
    pub fn lines_at(&self, closes: &[f64], index: usize) -> Option<(f64, f64)> {
        Some((
            kernel_regression_at(closes, index, self.fast)?,
            kernel_regression_at(closes, index, self.baseline)?,
        ))
    }
}

impl Strategy for KernelCrossoverStrategy {
    fn name(&self) -> &'static str {
        "kernel_crossover"
    }

    fn min_observations(&self) -> usize {
        KERNEL_CROSSOVER_MIN_OBSERVATIONS
    }

    fn evaluate(&self, series: &[Observation]) -> Signal {
        let Some(closes) = usable_closes(series, self.min_observations()) else {
            return Signal::None;
        };
        let last = closes.len() - 1;

        let (Some((fast, slow)), Some((prev_fast, prev_slow))) =
            (self.lines_at(&closes, last), self.lines_at(&closes, last - 1))
        else {
            return Signal::None;
        };

        if fast > slow && prev_fast <= prev_slow {
            Signal::Buy
        } else if fast < slow && prev_fast >= prev_slow {
            Signal::Sell
        } else {
            Signal::None
        }
    }
}
