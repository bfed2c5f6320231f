//! Operator alert texts: (subject, body) pairs.

use chrono::{DateTime, Utc};

use crate::core::counters::RunCounters;
use crate::models::Signal;

pub fn trade_alert(
    symbol: &str,
    signal: Signal,
    quantity: f64,
    price: f64,
    buying_power: f64,
    at: DateTime<Utc>,
) -> (String, String) {
    (
        format!("Trade Alert: {} {}", signal, symbol),
        format!(
            "Trade Executed:\nSymbol: {}\nAction: {}\nQuantity: {:.4}\nPrice: ${:.2}\nAccount Balance: ${:.2}\nTime: {}",
            symbol, signal, quantity, price, buying_power, at
        ),
    )
}

pub fn startup_alert(monitored: &[String], at: DateTime<Utc>) -> (String, String) {
    (
        "Trading Platform Started".to_string(),
        format!("Platform started at {}\nMonitoring: {}", at, monitored.join(", ")),
    )
}

pub fn shutdown_alert(counters: &RunCounters, at: DateTime<Utc>) -> (String, String) {
    (
        "Trading Platform Stopped".to_string(),
        format!(
            "Platform stopped at {}\nTotal trades: {}\nData ticks: {}\nRuntime: {:.1} hours",
            at,
            counters.trade_count,
            counters.data_ticks,
            counters.runtime_hours(at)
        ),
    )
}
