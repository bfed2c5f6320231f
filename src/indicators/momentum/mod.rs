//! Momentum indicators: RSI, rate of change

pub mod rate_of_change;
pub mod rsi;

pub use rate_of_change::*;
pub use rsi::*;
