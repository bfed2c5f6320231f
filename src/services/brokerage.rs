//! Brokerage interface: authentication, balances and order placement.

use async_trait::async_trait;
use tracing::error;

use crate::models::{AccountSnapshot, OrderAck, OrderRequest};
use crate::services::error::BrokerError;

#[async_trait]
pub trait Brokerage: Send + Sync {
    async fn authenticate(&self) -> Result<(), BrokerError>;

    async fn account_snapshot(&self) -> Result<AccountSnapshot, BrokerError>;

    /// Place a limit order. The order path (crypto, equity, option) follows
    /// `order.asset_class`.
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderAck, BrokerError>;
}

/// Fresh account snapshot, or all zeros when the brokerage cannot be read.
pub async fn load_account_snapshot(broker: &dyn Brokerage) -> AccountSnapshot {
    match broker.account_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Brokerage: failed to load account snapshot, using zeroed balances");
            AccountSnapshot::zeroed()
        }
    }
}
