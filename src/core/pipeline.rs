//! Per-symbol processing: fetch, evaluate, size, execute, alert.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AssetClass;
use crate::core::alerts;
use crate::execution::{ExecutionGateway, ExecutionOutcome, PositionSizer};
use crate::metrics::Metrics;
use crate::models::Signal;
use crate::services::{
    load_account_snapshot, notify_best_effort, Brokerage, Interval, MarketDataError, MarketDataProvider,
    Notifier, Span,
};
use crate::signals::SignalEngine;
use crate::strategies::Strategy;

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOutcome {
    NoData,
    NoSignal,
    /// The signal sized to nothing (no buying power or no valid price).
    ZeroQuantity(Signal),
    OrderFailed { signal: Signal, attempts: u32 },
    Traded {
        signal: Signal,
        order_id: String,
        quantity: f64,
        price: f64,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("market data unavailable for {symbol}: {source}")]
    MarketData {
        symbol: String,
        #[source]
        source: MarketDataError,
    },
    #[error("processing {symbol} panicked: {message}")]
    Panicked { symbol: String, message: String },
}

pub struct SymbolPipeline {
    market_data: Arc<dyn MarketDataProvider>,
    broker: Arc<dyn Brokerage>,
    notifier: Arc<dyn Notifier>,
    sizer: PositionSizer,
    gateway: ExecutionGateway,
    metrics: Arc<Metrics>,
}

impl SymbolPipeline {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        broker: Arc<dyn Brokerage>,
        notifier: Arc<dyn Notifier>,
        sizer: PositionSizer,
        gateway: ExecutionGateway,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            market_data,
            broker,
            notifier,
            sizer,
            gateway,
            metrics,
        }
    }

    pub async fn process(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        strategy: &dyn Strategy,
    ) -> Result<SymbolOutcome, PipelineError> {
        let series = self
            .market_data
            .fetch(symbol, asset_class, Interval::Hour, Span::Week)
            .await
            .map_err(|source| PipelineError::MarketData {
                symbol: symbol.to_string(),
                source,
            })?;

        let Some(last) = series.last() else {
            debug!(symbol = %symbol, "Pipeline: no market data for {}", symbol);
            return Ok(SymbolOutcome::NoData);
        };
        let price = last.close;

        let signal = SignalEngine::evaluate(symbol, &series, strategy);
        if signal.is_none() {
            return Ok(SymbolOutcome::NoSignal);
        }
        self.metrics.signals_total.with_label_values(&[signal.as_str()]).inc();

        let account = load_account_snapshot(self.broker.as_ref()).await;
        let Some(intent) = self.sizer.size(symbol, asset_class, signal, account.buying_power, price) else {
            warn!(
                symbol = %symbol,
                signal = %signal,
                buying_power = account.buying_power,
                price = price,
                "Pipeline: {} signal for {} sized to zero, skipping",
                signal,
                symbol
            );
            return Ok(SymbolOutcome::ZeroQuantity(signal));
        };

        match self.gateway.execute(&intent).await {
            ExecutionOutcome::Filled { order_id, .. } => {
                let (subject, body) = alerts::trade_alert(
                    symbol,
                    signal,
                    intent.quantity,
                    price,
                    account.buying_power,
                    Utc::now(),
                );
                if !notify_best_effort(self.notifier.as_ref(), &subject, &body).await {
                    self.metrics.notifications_failed_total.inc();
                }
                info!(
                    symbol = %symbol,
                    signal = %signal,
                    order_id = %order_id,
                    "Pipeline: traded {} {} {}",
                    signal,
                    intent.quantity,
                    symbol
                );
                Ok(SymbolOutcome::Traded {
                    signal,
                    order_id,
                    quantity: intent.quantity,
                    price,
                })
            }
            ExecutionOutcome::Failed { attempts, .. } => Ok(SymbolOutcome::OrderFailed { signal, attempts }),
        }
    }
}
