//! External collaborators: market data, brokerage and operator alerts.

pub mod brokerage;
pub mod error;
pub mod http_brokerage;
pub mod http_market_data;
pub mod market_data;
pub mod notifier;
pub mod paper;

pub use brokerage::{load_account_snapshot, Brokerage};
pub use error::{BrokerError, MarketDataError, NotifyError};
pub use http_brokerage::HttpBrokerage;
pub use http_market_data::HttpMarketDataProvider;
pub use market_data::{Interval, MarketDataProvider, Span};
pub use notifier::{notify_best_effort, HttpMailNotifier, LogNotifier, Notifier};
pub use paper::PaperBrokerage;

use serde_json::Value;
use url::Url;

/// Resolve `path` below `base`, keeping any path prefix the base already has.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
}

/// Brokerage payloads carry numbers either as JSON numbers or as decimal strings.
pub(crate) fn lenient_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
