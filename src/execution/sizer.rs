//! Position sizing: a fixed fraction of buying power scaled by signal confidence.

use crate::config::{AssetClass, TradingConfig};
use crate::models::{OrderIntent, Signal};

/// Confidence applied to BUY/SELL signals.
pub const DIRECTIONAL_CONFIDENCE: f64 = 0.7;
/// Confidence applied to CALL/PUT signals.
pub const DERIVATIVE_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSizer {
    base_fraction: f64,
}

impl PositionSizer {
    pub fn new(base_fraction: f64) -> Self {
        Self { base_fraction }
    }

    pub fn from_config(config: &TradingConfig) -> Self {
        Self::new(config.position_size)
    }

    pub fn confidence(signal: Signal) -> f64 {
        if signal.is_none() {
            0.0
        } else if signal.is_derivative() {
            DERIVATIVE_CONFIDENCE
        } else {
            DIRECTIONAL_CONFIDENCE
        }
    }

    /// Dollars to commit: `base_fraction * confidence * buying_power`.
    pub fn dollar_amount(&self, signal: Signal, buying_power: f64) -> f64 {
        if !buying_power.is_finite() || buying_power <= 0.0 {
            return 0.0;
        }
        self.base_fraction * Self::confidence(signal) * buying_power
    }

    /// Units to order at `price`. Zero when the price is not positive.
    pub fn quantity(&self, signal: Signal, buying_power: f64, price: f64) -> f64 {
        if !price.is_finite() || price <= 0.0 {
            return 0.0;
        }
        let quantity = self.dollar_amount(signal, buying_power) / price;
        if quantity.is_finite() && quantity > 0.0 {
            quantity
        } else {
            0.0
        }
    }

    /// Order intent for a fired signal, or `None` when it sizes to nothing.
    pub fn size(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        signal: Signal,
        buying_power: f64,
        price: f64,
    ) -> Option<OrderIntent> {
        let quantity = self.quantity(signal, buying_power, price);
        (quantity > 0.0).then(|| OrderIntent::new(symbol, asset_class, signal, quantity, price))
    }
}

impl Default for PositionSizer {
    fn default() -> Self {
        Self::from_config(&TradingConfig::default())
    }
}
