use serde::{Deserialize, Serialize};

/// Brokerage balances read fresh before every sizing decision.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub cash: f64,
    pub buying_power: f64,
    pub portfolio_value: f64,
}

impl AccountSnapshot {
    /// Fallback used whenever the brokerage cannot be read.
    pub fn zeroed() -> Self {
        Self::default()
    }
}
