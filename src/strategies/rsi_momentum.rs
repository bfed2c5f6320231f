//! RSI + rate-of-change momentum (options)

use crate::indicators::momentum::{calculate_momentum, calculate_rsi, DEFAULT_MOMENTUM_PERIOD, DEFAULT_RSI_PERIOD};
use crate::models::{Observation, Signal};
use crate::strategies::{usable_closes, Strategy};

#[derive(Debug, Clone)]
pub struct RsiMomentumStrategy {
    pub rsi_period: usize,
    pub momentum_period: usize,
    /// Minimum absolute fractional move (0.02 = 2%).
    pub momentum_threshold: f64,
}

impl Default for RsiMomentumStrategy {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            momentum_period: DEFAULT_MOMENTUM_PERIOD,
            momentum_threshold: 0.02,
        }
    }
}

impl Strategy for RsiMomentumStrategy {
    fn name(&self) -> &'static str {
        "rsi_momentum"
    }

    /// `rsi_period` bars, not `rsi_period + 1`: a series of exactly this length is
    /// evaluated with an RSI over one fewer difference (13 instead of 14 by default).
    fn min_observations(&self) -> usize {
        self.rsi_period.max(self.momentum_period + 1)
    }

    fn evaluate(&self, series: &[Observation]) -> Signal {
        let Some(closes) = usable_closes(series, self.min_observations()) else {
            return Signal::None;
        };
        // At the minimum length there is one difference fewer than the RSI period.
        let rsi_period = self.rsi_period.min(closes.len() - 1);
        let (Some(rsi), Some(momentum)) = (
            calculate_rsi(&closes, rsi_period),
            calculate_momentum(&closes, self.momentum_period),
        ) else {
            return Signal::None;
        };

        if rsi > 50.0 && momentum > self.momentum_threshold {
            Signal::Call
        } else if rsi < 50.0 && momentum < -self.momentum_threshold {
            Signal::Put
        } else {
            Signal::None
        }
    }
}
