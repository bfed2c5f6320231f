//! In-memory paper brokerage used when trading mode is `paper`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::{AccountSnapshot, Direction, OrderAck, OrderRequest};
use crate::services::brokerage::Brokerage;
use crate::services::error::BrokerError;

#[derive(Debug, Clone, PartialEq)]
pub struct PaperFill {
    pub order_id: String,
    pub request: OrderRequest,
}

#[derive(Debug, Default)]
struct PaperAccount {
    cash: f64,
    positions: HashMap<String, f64>,
    last_prices: HashMap<String, f64>,
    fills: Vec<PaperFill>,
}

/// Fills every affordable limit order immediately at its limit price.
pub struct PaperBrokerage {
    account: Mutex<PaperAccount>,
}

impl PaperBrokerage {
    pub fn new(starting_cash: f64) -> Self {
        Self {
            account: Mutex::new(PaperAccount {
                cash: starting_cash,
                ..PaperAccount::default()
            }),
        }
    }

    pub async fn fills(&self) -> Vec<PaperFill> {
        self.account.lock().await.fills.clone()
    }

    /// Net position under `key`: the symbol, or `"{symbol} call"` / `"{symbol} put"`
    /// for option contracts.
    pub async fn position(&self, key: &str) -> f64 {
        self.account.lock().await.positions.get(key).copied().unwrap_or(0.0)
    }
}

fn position_key(order: &OrderRequest) -> String {
    match order.option_type {
        Some(option_type) => format!("{} {}", order.symbol, option_type),
        None => order.symbol.clone(),
    }
}

#[async_trait]
impl Brokerage for PaperBrokerage {
    async fn authenticate(&self) -> Result<(), BrokerError> {
        info!("PaperBrokerage: session opened");
        Ok(())
    }

    async fn account_snapshot(&self) -> Result<AccountSnapshot, BrokerError> {
        let account = self.account.lock().await;
        let holdings: f64 = account
            .positions
            .iter()
            .map(|(symbol, qty)| qty * account.last_prices.get(symbol).copied().unwrap_or(0.0))
            .sum();

        Ok(AccountSnapshot {
            cash: account.cash,
            buying_power: account.cash.max(0.0),
            portfolio_value: account.cash + holdings,
        })
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderAck, BrokerError> {
        if !(order.quantity > 0.0) || !(order.price > 0.0) {
            return Err(BrokerError::Rejected(format!(
                "invalid quantity {} or price {}",
                order.quantity, order.price
            )));
        }

        let mut account = self.account.lock().await;
        let notional = order.quantity * order.price;
        let signed_qty = match order.direction {
            Direction::Buy => {
                if notional > account.cash {
                    return Err(BrokerError::Rejected(format!(
                        "insufficient buying power: need {:.2}, have {:.2}",
                        notional, account.cash
                    )));
                }
                account.cash -= notional;
                order.quantity
            }
            Direction::Sell => {
                account.cash += notional;
                -order.quantity
            }
        };
        let key = position_key(order);
        *account.positions.entry(key.clone()).or_insert(0.0) += signed_qty;
        account.last_prices.insert(key, order.price);

        let order_id = format!("paper-{}", order.client_order_id);
        account.fills.push(PaperFill {
            order_id: order_id.clone(),
            request: order.clone(),
        });

        Ok(OrderAck { order_id })
    }
}
