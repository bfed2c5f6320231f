//! Run counters owned by the scheduler for the lifetime of one run.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct RunCounters {
    pub trade_count: u64,
    pub data_ticks: u64,
    /// Not updated: the loop does not track the outcome of placed positions.
    pub winning_trades: u64,
    /// Not updated, see `winning_trades`.
    pub losing_trades: u64,
    /// Not updated, see `winning_trades`.
    pub total_pnl: f64,
    pub started_at: DateTime<Utc>,
}

impl RunCounters {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            trade_count: 0,
            data_ticks: 0,
            winning_trades: 0,
            losing_trades: 0,
            total_pnl: 0.0,
            started_at,
        }
    }

    pub fn record_tick(&mut self) -> u64 {
        self.data_ticks += 1;
        self.data_ticks
    }

    pub fn record_trade(&mut self) -> u64 {
        self.trade_count += 1;
        self.trade_count
    }

    /// Whether the latest tick is one that gets a progress report. `every == 0` never reports.
    pub fn is_report_tick(&self, every: u64) -> bool {
        every > 0 && self.data_ticks > 0 && self.data_ticks % every == 0
    }

    pub fn runtime_hours(&self, now: DateTime<Utc>) -> f64 {
        (now - self.started_at).num_milliseconds().max(0) as f64 / 3_600_000.0
    }
}
