//! Signal-generating strategies.
//!
//! Every strategy is a stateless function of the supplied window: indicators
//! are recomputed from the full series on each call and only the latest bars
//! decide the outcome.

pub mod kernel_crossover;
pub mod mean_reversion;
pub mod rsi_momentum;

pub use kernel_crossover::KernelCrossoverStrategy;
pub use mean_reversion::MeanReversionStrategy;
pub use rsi_momentum::RsiMomentumStrategy;

use std::sync::Arc;

use crate::config::AssetClass;
use crate::models::{closes, Observation, Signal};

pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Shortest series the strategy will evaluate; anything shorter is `Signal::None`.
    fn min_observations(&self) -> usize;

    fn evaluate(&self, series: &[Observation]) -> Signal;
}

/// Default strategy for an asset class.
pub fn strategy_for(class: AssetClass) -> Arc<dyn Strategy> {
    match class {
        AssetClass::Crypto => Arc::new(KernelCrossoverStrategy::default()),
        AssetClass::Equity => Arc::new(MeanReversionStrategy::default()),
        AssetClass::Option => Arc::new(RsiMomentumStrategy::default()),
    }
}

/// Closing prices when the series is long enough and every bar is valid.
pub(crate) fn usable_closes(series: &[Observation], min_observations: usize) -> Option<Vec<f64>> {
    if series.len() < min_observations || series.iter().any(|o| !o.is_valid()) {
        return None;
    }
    Some(closes(series))
}
