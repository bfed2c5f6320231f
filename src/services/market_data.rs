//! Market data provider interface.

use async_trait::async_trait;

use crate::config::AssetClass;
use crate::models::Observation;
use crate::services::error::MarketDataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Hour,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Hour => "hour",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    Week,
}

impl Span {
    pub fn as_str(&self) -> &'static str {
        match self {
            Span::Week => "week",
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Historical observations for a symbol, oldest first. An empty series means
    /// the provider has nothing for the symbol.
    async fn fetch(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        interval: Interval,
        span: Span,
    ) -> Result<Vec<Observation>, MarketDataError>;
}
