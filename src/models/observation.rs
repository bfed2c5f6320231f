use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One bar of market data: closing price and traded volume at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub volume: f64,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            close,
            volume,
        }
    }

    /// Finite, non-negative close and volume.
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close >= 0.0 && self.volume.is_finite() && self.volume >= 0.0
    }
}

/// Closing prices of a series, oldest first.
pub fn closes(series: &[Observation]) -> Vec<f64> {
    series.iter().map(|o| o.close).collect()
}
