//! Fixed-interval polling loop over the configured symbols.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures_util::FutureExt;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::{AssetClass, ScheduleConfig, SymbolConfig};
use crate::core::alerts;
use crate::core::counters::RunCounters;
use crate::core::pipeline::{PipelineError, SymbolOutcome, SymbolPipeline};
use crate::metrics::Metrics;
use crate::services::{notify_best_effort, BrokerError, Brokerage, Notifier};
use crate::strategies::{strategy_for, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    NotStarted,
    Running,
    Stopped,
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("brokerage authentication failed: {0}")]
    Authentication(#[source] BrokerError),
    #[error("cannot {action} a scheduler in state {state:?}")]
    InvalidState {
        action: &'static str,
        state: SchedulerState,
    },
}

/// One symbol and the strategy that evaluates it each tick.
#[derive(Clone)]
pub struct WatchEntry {
    pub symbol: String,
    pub asset_class: AssetClass,
    pub strategy: Arc<dyn Strategy>,
}

impl WatchEntry {
    pub fn new(symbol: impl Into<String>, asset_class: AssetClass) -> Self {
        Self {
            symbol: symbol.into(),
            asset_class,
            strategy: strategy_for(asset_class),
        }
    }

    /// Crypto symbols first, then stocks; options only when enabled.
    pub fn from_config(symbols: &SymbolConfig, enable_options: bool) -> Vec<WatchEntry> {
        let mut entries: Vec<WatchEntry> = symbols
            .crypto
            .iter()
            .map(|s| WatchEntry::new(s.clone(), AssetClass::Crypto))
            .chain(symbols.stocks.iter().map(|s| WatchEntry::new(s.clone(), AssetClass::Equity)))
            .collect();
        if enable_options {
            entries.extend(symbols.options.iter().map(|s| WatchEntry::new(s.clone(), AssetClass::Option)));
        }
        entries
    }
}

pub struct Scheduler {
    pipeline: SymbolPipeline,
    broker: Arc<dyn Brokerage>,
    notifier: Arc<dyn Notifier>,
    watchlist: Vec<WatchEntry>,
    schedule: ScheduleConfig,
    metrics: Arc<Metrics>,
    state: SchedulerState,
}

impl Scheduler {
    pub fn new(
        pipeline: SymbolPipeline,
        broker: Arc<dyn Brokerage>,
        notifier: Arc<dyn Notifier>,
        watchlist: Vec<WatchEntry>,
        schedule: ScheduleConfig,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            pipeline,
            broker,
            notifier,
            watchlist,
            schedule,
            metrics,
            state: SchedulerState::NotStarted,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn watchlist(&self) -> &[WatchEntry] {
        &self.watchlist
    }

    /// Authenticate and announce the run. Stays `NotStarted` if authentication fails.
    pub async fn start(&mut self) -> Result<RunCounters, SchedulerError> {
        if self.state != SchedulerState::NotStarted {
            return Err(SchedulerError::InvalidState {
                action: "start",
                state: self.state,
            });
        }

        if let Err(e) = self.broker.authenticate().await {
            error!(error = %e, "Scheduler: failed to authenticate with brokerage");
            return Err(SchedulerError::Authentication(e));
        }
        self.state = SchedulerState::Running;

        let started_at = Utc::now();
        let monitored: Vec<String> = self.watchlist.iter().map(|e| e.symbol.clone()).collect();
        info!(symbols = ?monitored, "Scheduler: started, monitoring {}", monitored.join(", "));

        let (subject, body) = alerts::startup_alert(&monitored, started_at);
        self.alert(&subject, &body).await;

        Ok(RunCounters::new(started_at))
    }

    /// One pass over every watched symbol. A fault in one symbol never stops the others.
    pub async fn tick(&self, counters: &mut RunCounters) {
        let tick = counters.record_tick();
        self.metrics.ticks_total.inc();
        debug!(tick = tick, "Scheduler: tick {}", tick);

        for entry in &self.watchlist {
            match self.process_isolated(entry).await {
                Ok(SymbolOutcome::Traded {
                    signal, quantity, ..
                }) => {
                    let trades = counters.record_trade();
                    info!(
                        symbol = %entry.symbol,
                        trade = trades,
                        "Trade {}: {} {} {}",
                        trades,
                        signal,
                        quantity,
                        entry.symbol
                    );
                }
                Ok(SymbolOutcome::OrderFailed { signal, attempts }) => {
                    warn!(
                        symbol = %entry.symbol,
                        signal = %signal,
                        attempts = attempts,
                        "Scheduler: {} order for {} failed, no trade recorded",
                        signal,
                        entry.symbol
                    );
                }
                Ok(outcome) => {
                    debug!(symbol = %entry.symbol, outcome = ?outcome, "Scheduler: {} done", entry.symbol);
                }
                Err(e @ PipelineError::MarketData { .. }) => {
                    warn!(symbol = %entry.symbol, error = %e, "Scheduler: skipping {} this tick", entry.symbol);
                }
                Err(e) => {
                    self.metrics.symbol_faults_total.inc();
                    error!(symbol = %entry.symbol, error = %e, "Error processing strategy for {}", entry.symbol);
                }
            }
        }

        if counters.is_report_tick(self.schedule.report_every_ticks) {
            info!(
                tick = tick,
                trades = counters.trade_count,
                runtime_hours = counters.runtime_hours(Utc::now()),
                "Tick {}: {} trades, Runtime: {:.1} hours",
                tick,
                counters.trade_count,
                counters.runtime_hours(Utc::now())
            );
        }
    }

    async fn process_isolated(&self, entry: &WatchEntry) -> Result<SymbolOutcome, PipelineError> {
        AssertUnwindSafe(
            self.pipeline
                .process(&entry.symbol, entry.asset_class, entry.strategy.as_ref()),
        )
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            Err(PipelineError::Panicked {
                symbol: entry.symbol.clone(),
                message: panic_message(panic.as_ref()),
            })
        })
    }

    /// Start, tick every `poll_interval` until `shutdown` carries `true` (or its
    /// sender is dropped), then stop. An in-flight tick always completes.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<RunCounters, SchedulerError> {
        let mut counters = self.start().await?;

        loop {
            if *shutdown.borrow() {
                info!("Scheduler: received interrupt, stopping...");
                break;
            }

            if let Err(panic) = AssertUnwindSafe(self.tick(&mut counters)).catch_unwind().await {
                error!(error = %panic_message(panic.as_ref()), "Error in main loop");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.schedule.poll_interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        info!("Scheduler: shutdown channel closed, stopping...");
                        break;
                    }
                }
            }
        }

        self.stop(counters).await
    }

    /// Send the final summary and move to `Stopped`.
    pub async fn stop(&mut self, counters: RunCounters) -> Result<RunCounters, SchedulerError> {
        if self.state != SchedulerState::Running {
            return Err(SchedulerError::InvalidState {
                action: "stop",
                state: self.state,
            });
        }
        self.state = SchedulerState::Stopped;

        let (subject, body) = alerts::shutdown_alert(&counters, Utc::now());
        self.alert(&subject, &body).await;

        match self.metrics.export() {
            Ok(text) => debug!("Scheduler: final metrics\n{}", text),
            Err(e) => warn!(error = %e, "Scheduler: failed to export metrics"),
        }
        info!(
            trades = counters.trade_count,
            ticks = counters.data_ticks,
            "Scheduler: stopped"
        );
        Ok(counters)
    }

    async fn alert(&self, subject: &str, body: &str) {
        if !notify_best_effort(self.notifier.as_ref(), subject, body).await {
            self.metrics.notifications_failed_total.inc();
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
