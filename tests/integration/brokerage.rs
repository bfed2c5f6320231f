use serde_json::json;
use tradeloop::config::AssetClass;
use tradeloop::models::{OrderIntent, OrderRequest, Signal};
use tradeloop::services::{load_account_snapshot, BrokerError, Brokerage, HttpBrokerage};
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{api_base, credentials, mock_balances, mock_login, TOKEN};

fn order(class: AssetClass, signal: Signal) -> OrderRequest {
    OrderIntent::new("ETC", class, signal, 1.5, 20.25).request().unwrap()
}

async fn authenticated(server: &MockServer) -> HttpBrokerage {
    mock_login(server).await;
    let broker = HttpBrokerage::new(api_base(server), credentials());
    broker.authenticate().await.unwrap();
    broker
}

#[tokio::test]
async fn test_authenticate_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/oauth2/token"))
        .and(body_partial_json(json!({
            "grant_type": "password",
            "username": "trader",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": TOKEN })))
        .expect(1)
        .mount(&server)
        .await;

    let broker = HttpBrokerage::new(api_base(&server), credentials());
    broker.authenticate().await.unwrap();
}

#[tokio::test]
async fn test_rejected_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let broker = HttpBrokerage::new(api_base(&server), credentials());
    let result = broker.authenticate().await;
    assert!(matches!(result, Err(BrokerError::AuthenticationRejected(ref m)) if m.contains("401")));
}

#[tokio::test]
async fn test_login_without_token_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "mfa required" })))
        .mount(&server)
        .await;

    let broker = HttpBrokerage::new(api_base(&server), credentials());
    assert!(matches!(
        broker.authenticate().await,
        Err(BrokerError::AuthenticationRejected(_))
    ));
}

#[tokio::test]
async fn test_requests_before_login_fail() {
    let server = MockServer::start().await;
    let broker = HttpBrokerage::new(api_base(&server), credentials());

    assert!(matches!(
        broker.submit_order(&order(AssetClass::Crypto, Signal::Buy)).await,
        Err(BrokerError::NotAuthenticated)
    ));
    assert!(matches!(broker.account_snapshot().await, Err(BrokerError::NotAuthenticated)));
}

#[tokio::test]
async fn test_account_snapshot_reads_balances() {
    let server = MockServer::start().await;
    let broker = authenticated(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/accounts"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cash": "1500.25",
            "buying_power": "1200.50",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/portfolios"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "equity": 2500.0 })))
        .mount(&server)
        .await;

    let snapshot = broker.account_snapshot().await.unwrap();
    assert_eq!(snapshot.cash, 1500.25);
    assert_eq!(snapshot.buying_power, 1200.5);
    assert_eq!(snapshot.portfolio_value, 2500.0);
}

#[tokio::test]
async fn test_unreadable_account_loads_as_zero() {
    let server = MockServer::start().await;
    let broker = authenticated(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/accounts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let snapshot = load_account_snapshot(&broker).await;
    assert_eq!(snapshot.cash, 0.0);
    assert_eq!(snapshot.buying_power, 0.0);
    assert_eq!(snapshot.portfolio_value, 0.0);
}

#[tokio::test]
async fn test_crypto_limit_order() {
    let server = MockServer::start().await;
    let broker = authenticated(&server).await;
    let request = order(AssetClass::Crypto, Signal::Buy);
    Mock::given(method("POST"))
        .and(path("/api/orders/crypto"))
        .and(bearer_token(TOKEN))
        .and(body_partial_json(json!({
            "symbol": "ETC",
            "side": "buy",
            "quantity": 1.5,
            "price": 20.25,
            "type": "limit",
            "time_in_force": "gtc",
            "ref_id": request.client_order_id.to_string(),
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "ord-42", "state": "queued" })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = broker.submit_order(&request).await.unwrap();
    assert_eq!(ack.order_id, "ord-42");
}

#[tokio::test]
async fn test_order_path_follows_asset_class() {
    let server = MockServer::start().await;
    let broker = authenticated(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/orders/equity"))
        .and(body_partial_json(json!({ "side": "sell" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "eq-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/options"))
        .and(body_partial_json(json!({ "side": "buy" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "opt-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let equity = broker.submit_order(&order(AssetClass::Equity, Signal::Sell)).await.unwrap();
    let option = broker.submit_order(&order(AssetClass::Option, Signal::Put)).await.unwrap();
    assert_eq!(equity.order_id, "eq-1");
    assert_eq!(option.order_id, "opt-1");
}

#[tokio::test]
async fn test_order_without_id_is_a_failure() {
    let server = MockServer::start().await;
    let broker = authenticated(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/orders/crypto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "unconfirmed" })))
        .mount(&server)
        .await;

    assert!(matches!(
        broker.submit_order(&order(AssetClass::Crypto, Signal::Buy)).await,
        Err(BrokerError::MissingOrderId)
    ));
}

#[tokio::test]
async fn test_order_error_status_is_reported() {
    let server = MockServer::start().await;
    let broker = authenticated(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/orders/crypto"))
        .respond_with(ResponseTemplate::new(400).set_body_string("insufficient funds"))
        .mount(&server)
        .await;

    match broker.submit_order(&order(AssetClass::Crypto, Signal::Buy)).await {
        Err(BrokerError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert_eq!(body, "insufficient funds");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_balances_helper_mounts_both_endpoints() {
    let server = MockServer::start().await;
    let broker = authenticated(&server).await;
    mock_balances(&server, 750.0).await;

    let snapshot = broker.account_snapshot().await.unwrap();
    assert_eq!(snapshot.buying_power, 750.0);
    assert_eq!(snapshot.portfolio_value, 750.0);
}


#[tokio::test]
async fn test_call_and_put_orders_name_the_contract() {
    let server = MockServer::start().await;
    let broker = authenticated(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/orders/options"))
        .and(body_partial_json(json!({ "side": "buy", "option_type": "call" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "call-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/options"))
        .and(body_partial_json(json!({ "side": "buy", "option_type": "put" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "put-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let call = broker.submit_order(&order(AssetClass::Option, Signal::Call)).await.unwrap();
    let put = broker.submit_order(&order(AssetClass::Option, Signal::Put)).await.unwrap();
    assert_eq!(call.order_id, "call-1");
    assert_eq!(put.order_id, "put-1");
}
