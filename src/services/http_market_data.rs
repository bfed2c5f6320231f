//! REST historicals provider

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::AssetClass;
use crate::models::Observation;
use crate::services::error::MarketDataError;
use crate::services::market_data::{Interval, MarketDataProvider, Span};
use crate::services::{endpoint, lenient_f64};

/// `GET {base}/historicals/{symbol}?interval=..&span=..&class=..`
pub struct HttpMarketDataProvider {
    base_url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct HistoricalsResponse {
    #[serde(default)]
    data_points: Vec<DataPoint>,
}

#[derive(Debug, Deserialize)]
struct DataPoint {
    begins_at: Option<Value>,
    close_price: Option<Value>,
    volume: Option<Value>,
}

impl DataPoint {
    /// Rows whose timestamp or close does not parse are dropped; a missing volume counts as 0.
    fn into_observation(self) -> Option<Observation> {
        let timestamp = DateTime::parse_from_rfc3339(self.begins_at.as_ref()?.as_str()?)
            .ok()?
            .with_timezone(&Utc);
        let close = lenient_f64(self.close_price.as_ref())?;
        let volume = match self.volume {
            Some(ref v) => lenient_f64(Some(v))?,
            None => 0.0,
        };
        let observation = Observation::new(timestamp, close, volume);
        observation.is_valid().then_some(observation)
    }
}

impl HttpMarketDataProvider {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: Url, client: reqwest::Client) -> Self {
        Self { base_url, client }
    }
}

#[async_trait]
impl MarketDataProvider for HttpMarketDataProvider {
    async fn fetch(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        interval: Interval,
        span: Span,
    ) -> Result<Vec<Observation>, MarketDataError> {
        let url = endpoint(&self.base_url, &format!("historicals/{}", symbol))?;
        let response = self
            .client
            .get(url)
            .query(&[
                ("interval", interval.as_str()),
                ("span", span.as_str()),
                ("class", asset_class.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(MarketDataError::Status(status.as_u16()));
        }

        let body: HistoricalsResponse = response.json().await?;
        let received = body.data_points.len();
        let mut series: Vec<Observation> = body
            .data_points
            .into_iter()
            .filter_map(DataPoint::into_observation)
            .collect();
        series.sort_by_key(|o| o.timestamp);

        debug!(
            symbol = %symbol,
            received = received,
            kept = series.len(),
            "MarketData: fetched {} observations for {}",
            series.len(),
            symbol
        );
        Ok(series)
    }
}
