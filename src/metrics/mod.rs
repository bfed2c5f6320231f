//! Process counters exported in Prometheus text format.

use prometheus::{IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub ticks_total: IntCounter,
    pub signals_total: IntCounterVec,
    pub order_attempts_total: IntCounter,
    pub orders_submitted_total: IntCounter,
    pub order_failures_total: IntCounter,
    pub symbol_faults_total: IntCounter,
    pub notifications_failed_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("tradeloop".to_string()), None)?;

        let ticks_total = IntCounter::new("ticks_total", "Scheduler ticks started")?;
        let signals_total = IntCounterVec::new(
            Opts::new("signals_total", "Signals fired by strategies"),
            &["signal"],
        )?;
        let order_attempts_total = IntCounter::new("order_attempts_total", "Order submission attempts")?;
        let orders_submitted_total =
            IntCounter::new("orders_submitted_total", "Orders acknowledged by the brokerage")?;
        let order_failures_total =
            IntCounter::new("order_failures_total", "Orders abandoned after exhausting retries")?;
        let symbol_faults_total =
            IntCounter::new("symbol_faults_total", "Per-symbol processing faults isolated by the scheduler")?;
        let notifications_failed_total =
            IntCounter::new("notifications_failed_total", "Alerts that could not be delivered")?;

        registry.register(Box::new(ticks_total.clone()))?;
        registry.register(Box::new(signals_total.clone()))?;
        registry.register(Box::new(order_attempts_total.clone()))?;
        registry.register(Box::new(orders_submitted_total.clone()))?;
        registry.register(Box::new(order_failures_total.clone()))?;
        registry.register(Box::new(symbol_faults_total.clone()))?;
        registry.register(Box::new(notifications_failed_total.clone()))?;

        Ok(Self {
            registry,
            ticks_total,
            signals_total,
            order_attempts_total,
            orders_submitted_total,
            order_failures_total,
            symbol_faults_total,
            notifications_failed_total,
        })
    }

    pub fn export(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}
