//! REST brokerage client

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

use crate::config::{AssetClass, Credentials};
use crate::models::{AccountSnapshot, OrderAck, OrderRequest};
use crate::services::brokerage::Brokerage;
use crate::services::error::BrokerError;
use crate::services::{endpoint, lenient_f64};

pub struct HttpBrokerage {
    base_url: Url,
    credentials: Credentials,
    client: reqwest::Client,
    token: RwLock<Option<String>>,
}

#[derive(Debug, Serialize)]
struct LimitOrderBody<'a> {
    symbol: &'a str,
    side: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    option_type: Option<&'static str>,
    quantity: f64,
    price: f64,
    #[serde(rename = "type")]
    order_type: &'static str,
    time_in_force: &'static str,
    ref_id: String,
}

fn order_path(asset_class: AssetClass) -> &'static str {
    match asset_class {
        AssetClass::Crypto => "orders/crypto",
        AssetClass::Equity => "orders/equity",
        AssetClass::Option => "orders/options",
    }
}

impl HttpBrokerage {
    pub fn new(base_url: Url, credentials: Credentials) -> Self {
        Self::with_client(base_url, credentials, reqwest::Client::new())
    }

    pub fn with_client(base_url: Url, credentials: Credentials, client: reqwest::Client) -> Self {
        Self {
            base_url,
            credentials,
            client,
            token: RwLock::new(None),
        }
    }

    async fn bearer(&self) -> Result<String, BrokerError> {
        self.token.read().await.clone().ok_or(BrokerError::NotAuthenticated)
    }

    async fn get_json(&self, path: &str) -> Result<Value, BrokerError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(endpoint(&self.base_url, path)?)
            .bearer_auth(token)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, BrokerError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BrokerError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl Brokerage for HttpBrokerage {
    async fn authenticate(&self) -> Result<(), BrokerError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "oauth2/token")?)
            .json(&json!({
                "grant_type": "password",
                "username": self.credentials.username,
                "password": self.credentials.password,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrokerError::AuthenticationRejected(format!("status {}: {}", status.as_u16(), body)));
        }

        let body: Value = response.json().await?;
        let token = body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BrokerError::AuthenticationRejected("no access token in response".to_string()))?;

        *self.token.write().await = Some(token.to_string());
        info!(username = %self.credentials.username, "Brokerage: authenticated");
        Ok(())
    }

    async fn account_snapshot(&self) -> Result<AccountSnapshot, BrokerError> {
        let account = self.get_json("accounts").await?;
        let portfolio = self.get_json("portfolios").await?;

        Ok(AccountSnapshot {
            cash: lenient_f64(account.get("cash")).unwrap_or(0.0),
            buying_power: lenient_f64(account.get("buying_power")).unwrap_or(0.0),
            portfolio_value: lenient_f64(portfolio.get("equity")).unwrap_or(0.0),
        })
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderAck, BrokerError> {
        let token = self.bearer().await?;
        let body = LimitOrderBody {
            symbol: &order.symbol,
            side: order.direction.as_str(),
            option_type: order.option_type.map(|t| t.as_str()),
            quantity: order.quantity,
            price: order.price,
            order_type: "limit",
            time_in_force: "gtc",
            ref_id: order.client_order_id.to_string(),
        };

        let response = self
            .client
            .post(endpoint(&self.base_url, order_path(order.asset_class))?)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let payload = read_json(response).await?;

        let order_id = payload
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or(BrokerError::MissingOrderId)?;

        debug!(symbol = %order.symbol, order_id = %order_id, "Brokerage: order accepted");
        Ok(OrderAck {
            order_id: order_id.to_string(),
        })
    }
}
