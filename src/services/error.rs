use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid market data endpoint: {0}")]
    Url(#[from] url::ParseError),
    #[error("market data provider returned status {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("brokerage request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid brokerage endpoint: {0}")]
    Url(#[from] url::ParseError),
    #[error("brokerage returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("authentication rejected: {0}")]
    AuthenticationRejected(String),
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("order response carried no order id")]
    MissingOrderId,
    #[error("order rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("mail relay returned status {0}")]
    Status(u16),
}
