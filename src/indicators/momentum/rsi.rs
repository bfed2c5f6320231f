//! RSI (Relative Strength Index) indicator

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Calculate RSI over the trailing `period` one-step differences.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// A window without losses saturates at 100. Needs `period + 1` finite closes.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let window = &closes[closes.len() - (period + 1)..];
    if window.iter().any(|c| !c.is_finite()) {
        return None;
    }

    let (gains, losses) = window.windows(2).fold((0.0, 0.0), |(gains, losses), pair| {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            (gains + change, losses)
        } else {
            (gains, losses - change)
        }
    });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some((100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0))
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> Option<f64> {
    calculate_rsi(closes, DEFAULT_RSI_PERIOD)
}
