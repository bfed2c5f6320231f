//! Main signal evaluation engine: runs a strategy over one symbol's series.

use crate::models::{Observation, Signal};
use crate::strategies::Strategy;
use tracing::{debug, info};

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate `strategy` over `series`. Short or invalid series are `Signal::None`.
    pub fn evaluate(symbol: &str, series: &[Observation], strategy: &dyn Strategy) -> Signal {
        if series.len() < strategy.min_observations() {
            debug!(
                symbol = %symbol,
                strategy = strategy.name(),
                count = series.len(),
                min = strategy.min_observations(),
                "SignalEngine: not enough observations ({} < {}) for {}",
                series.len(),
                strategy.min_observations(),
                symbol
            );
            return Signal::None;
        }

        let signal = strategy.evaluate(series);
        if signal.is_none() {
            debug!(symbol = %symbol, strategy = strategy.name(), "SignalEngine: no signal for {}", symbol);
        } else {
            info!(
                symbol = %symbol,
                strategy = strategy.name(),
                signal = %signal,
                "SignalEngine: {} fired {} for {}",
                strategy.name(),
                signal,
                symbol
            );
        }
        signal
    }
}
