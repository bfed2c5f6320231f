//! Order submission with bounded exponential-backoff retry.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::ExecutionConfig;
use crate::metrics::Metrics;
use crate::models::{OrderAck, OrderIntent, OrderRequest, Signal};
use crate::services::{BrokerError, Brokerage};

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Broker(#[from] BrokerError),
    #[error("signal {0} does not map to an order side")]
    NoDirection(Signal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Filled { order_id: String, attempts: u32 },
    Failed { attempts: u32, last_error: String },
}

impl ExecutionOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, ExecutionOutcome::Filled { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            ExecutionOutcome::Filled { attempts, .. } | ExecutionOutcome::Failed { attempts, .. } => {
                *attempts
            }
        }
    }
}

pub struct ExecutionGateway {
    broker: Arc<dyn Brokerage>,
    config: ExecutionConfig,
    metrics: Option<Arc<Metrics>>,
}

impl ExecutionGateway {
    pub fn new(broker: Arc<dyn Brokerage>, config: ExecutionConfig) -> Self {
        Self {
            broker,
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Waits `base_delay * 2^n` before retry `n`, at most `max_attempts` submissions.
    fn backoff(&self) -> ExponentialBuilder {
        let retries = self.config.max_attempts.saturating_sub(1);
        let ceiling = self
            .config
            .base_delay
            .saturating_mul(1u32 << retries.min(30));
        ExponentialBuilder::default()
            .with_min_delay(self.config.base_delay)
            .with_factor(2.0)
            .with_max_delay(ceiling)
            .with_max_times(retries as usize)
    }

    async fn attempt(&self, request: &OrderRequest, attempts: &AtomicU32) -> Result<OrderAck, ExecutionError> {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(ref metrics) = self.metrics {
            metrics.order_attempts_total.inc();
        }
        self.broker.submit_order(request).await.map_err(|e| {
            warn!(
                symbol = %request.symbol,
                attempt = attempt,
                error = %e,
                "Execution: attempt {} failed for {}: {}",
                attempt,
                request.symbol,
                e
            );
            ExecutionError::from(e)
        })
    }

    /// Submit one order. Failures never escape: they are reported in the outcome.
    pub async fn execute(&self, intent: &OrderIntent) -> ExecutionOutcome {
        let Some(request) = intent.request() else {
            return ExecutionOutcome::Failed {
                attempts: 0,
                last_error: ExecutionError::NoDirection(intent.signal).to_string(),
            };
        };

        let attempts = AtomicU32::new(0);
        let result = (|| self.attempt(&request, &attempts))
            .retry(self.backoff())
            .sleep(tokio::time::sleep)
            .notify(|_: &ExecutionError, delay: Duration| {
                warn!(
                    symbol = %request.symbol,
                    delay_ms = delay.as_millis() as u64,
                    "Execution: retrying {} in {:?}",
                    request.symbol,
                    delay
                );
            })
            .await;
        let attempts = attempts.load(Ordering::SeqCst);

        match result {
            Ok(ack) => {
                if let Some(ref metrics) = self.metrics {
                    metrics.orders_submitted_total.inc();
                }
                info!(
                    symbol = %request.symbol,
                    direction = %request.direction,
                    quantity = request.quantity,
                    price = request.price,
                    order_id = %ack.order_id,
                    attempts = attempts,
                    "Execution: {} order placed for {} {} at ${}",
                    request.direction,
                    request.quantity,
                    request.symbol,
                    request.price
                );
                ExecutionOutcome::Filled {
                    order_id: ack.order_id,
                    attempts,
                }
            }
            Err(e) => {
                if let Some(ref metrics) = self.metrics {
                    metrics.order_failures_total.inc();
                }
                error!(
                    symbol = %request.symbol,
                    attempts = attempts,
                    error = %e,
                    "Execution: giving up on {} after {} attempts",
                    request.symbol,
                    attempts
                );
                ExecutionOutcome::Failed {
                    attempts,
                    last_error: e.to_string(),
                }
            }
        }
    }
}
