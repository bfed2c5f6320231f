//! RSI + Bollinger Bands mean reversion (broad index)

use crate::indicators::momentum::{calculate_rsi, DEFAULT_RSI_PERIOD};
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::{Observation, Signal};
use crate::strategies::{usable_closes, Strategy};

#[derive(Debug, Clone)]
pub struct MeanReversionStrategy {
    pub rsi_period: usize,
    pub band_period: usize,
    pub band_std_dev: f64,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for MeanReversionStrategy {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            band_period: 20,
            band_std_dev: 2.0,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl Strategy for MeanReversionStrategy {
    fn name(&self) -> &'static str {
        "mean_reversion"
    }

    fn min_observations(&self) -> usize {
        self.band_period.max(self.rsi_period + 1)
    }

    fn evaluate(&self, series: &[Observation]) -> Signal {
        let Some(closes) = usable_closes(series, self.min_observations()) else {
            return Signal::None;
        };
        let (Some(rsi), Some(bands)) = (
            calculate_rsi(&closes, self.rsi_period),
            calculate_bollinger_bands(&closes, self.band_period, self.band_std_dev),
        ) else {
            return Signal::None;
        };
        let close = closes[closes.len() - 1];

        if rsi < self.oversold && close < bands.lower {
            Signal::Buy
        } else if rsi > self.overbought && close > bands.upper {
            Signal::Sell
        } else {
            Signal::None
        }
    }
}
