use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AssetClass;
use crate::models::signal::{Direction, OptionType, Signal};

/// A sized order waiting for submission. Consumed once by the execution gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderIntent {
    pub symbol: String,
    pub asset_class: AssetClass,
    pub signal: Signal,
    pub quantity: f64,
    pub reference_price: f64,
    /// Generated once per intent and reused by every retry so the brokerage can
    /// deduplicate resubmissions.
    pub client_order_id: Uuid,
}

impl OrderIntent {
    pub fn new(
        symbol: impl Into<String>,
        asset_class: AssetClass,
        signal: Signal,
        quantity: f64,
        reference_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            asset_class,
            signal,
            quantity,
            reference_price,
            client_order_id: Uuid::new_v4(),
        }
    }

    /// Wire request for one submission attempt. `None` for a non-firing signal.
    pub fn request(&self) -> Option<OrderRequest> {
        Some(OrderRequest {
            symbol: self.symbol.clone(),
            asset_class: self.asset_class,
            direction: self.signal.direction()?,
            option_type: self.signal.option_type(),
            quantity: self.quantity,
            price: self.reference_price,
            client_order_id: self.client_order_id,
        })
    }
}

/// Limit order as handed to the brokerage collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub asset_class: AssetClass,
    pub direction: Direction,
    /// Set for CALL/PUT signals; both buy, so this is what tells them apart.
    pub option_type: Option<OptionType>,
    pub quantity: f64,
    pub price: f64,
    pub client_order_id: Uuid,
}

/// Brokerage acknowledgement carrying the order handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: String,
}
