//! Bollinger Bands indicator

use crate::common::math;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands over the trailing `period` closes
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
pub fn calculate_bollinger_bands(closes: &[f64], period: usize, std_dev: f64) -> Option<BollingerBands> {
    let middle = math::sma(closes, period)?;
    let std = math::standard_deviation(closes, period)?;

    Some(BollingerBands {
        upper: middle + std_dev * std,
        middle,
        lower: middle - std_dev * std,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(closes: &[f64]) -> Option<BollingerBands> {
    calculate_bollinger_bands(closes, 20, 2.0)
}
