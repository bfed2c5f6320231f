use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tradeloop::config::{AssetClass, ExecutionConfig, ScheduleConfig, SymbolConfig};
use tradeloop::core::{Scheduler, SchedulerState, SymbolPipeline, WatchEntry};
use tradeloop::execution::{ExecutionGateway, PositionSizer};
use tradeloop::metrics::Metrics;
use tradeloop::services::{HttpBrokerage, HttpMarketDataProvider, LogNotifier};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{api_base, credentials, data_points, mock_balances, mock_historicals, mock_login};

fn build_scheduler(server: &MockServer, watchlist: Vec<WatchEntry>) -> (Scheduler, Arc<Metrics>) {
    let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
    let broker = Arc::new(HttpBrokerage::new(api_base(server), credentials()));
    let market_data = Arc::new(HttpMarketDataProvider::new(api_base(server)));
    let notifier = Arc::new(LogNotifier);
    let execution = ExecutionConfig {
        max_attempts: 3,
        base_delay: Duration::from_millis(5),
    };
    let gateway = ExecutionGateway::new(broker.clone(), execution).with_metrics(metrics.clone());
    let pipeline = SymbolPipeline::new(
        market_data,
        broker.clone(),
        notifier.clone(),
        PositionSizer::default(),
        gateway,
        metrics.clone(),
    );
    let scheduler = Scheduler::new(
        pipeline,
        broker,
        notifier,
        watchlist,
        ScheduleConfig::default(),
        metrics.clone(),
    );
    (scheduler, metrics)
}

#[tokio::test]
async fn test_one_tick_places_crypto_order() {
    let server = MockServer::start().await;
    mock_login(&server).await;
    mock_balances(&server, 10_000.0).await;

    let mut closes = vec![10.0; 10];
    closes.push(11.0);
    mock_historicals(&server, "ETC", "crypto", data_points(&closes)).await;
    mock_historicals(&server, "SPY", "equity", data_points(&[100.0; 25])).await;

    Mock::given(method("POST"))
        .and(path("/api/orders/crypto"))
        .and(body_partial_json(json!({ "symbol": "ETC", "side": "buy", "price": 11.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ord-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/equity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "never" })))
        .expect(0)
        .mount(&server)
        .await;

    let (mut scheduler, metrics) = build_scheduler(&server, WatchEntry::from_config(&SymbolConfig::default(), false));

    let mut counters = scheduler.start().await.unwrap();
    scheduler.tick(&mut counters).await;
    let counters = scheduler.stop(counters).await.unwrap();

    assert_eq!(counters.trade_count, 1);
    assert_eq!(counters.data_ticks, 1);
    assert_eq!(scheduler.state(), SchedulerState::Stopped);
    assert_eq!(metrics.orders_submitted_total.get(), 1);
    assert_eq!(metrics.signals_total.with_label_values(&["BUY"]).get(), 1);
}

#[tokio::test]
async fn test_order_retried_after_transient_failure() {
    let server = MockServer::start().await;
    mock_login(&server).await;
    mock_balances(&server, 10_000.0).await;

    let mut closes = vec![10.0; 10];
    closes.push(11.0);
    mock_historicals(&server, "ETC", "crypto", data_points(&closes)).await;

    Mock::given(method("POST"))
        .and(path("/api/orders/crypto"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/crypto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ord-2" })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut scheduler, metrics) =
        build_scheduler(&server, vec![WatchEntry::new("ETC", AssetClass::Crypto)]);

    let mut counters = scheduler.start().await.unwrap();
    scheduler.tick(&mut counters).await;

    assert_eq!(counters.trade_count, 1);
    assert_eq!(metrics.order_attempts_total.get(), 2);
}
