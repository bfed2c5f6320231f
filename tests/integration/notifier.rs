use serde_json::json;
use tradeloop::services::{notify_best_effort, HttpMailNotifier, NotifyError, Notifier};
use url::Url;
use wiremock::matchers::{basic_auth, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::credentials;

fn relay(server: &MockServer) -> Url {
    Url::parse(&format!("{}/v3/mail/send", server.uri())).unwrap()
}

#[tokio::test]
async fn test_mail_is_posted_with_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .and(basic_auth("trader", "hunter2"))
        .and(body_json(json!({
            "from": "trader",
            "to": "ops@example.com",
            "subject": "Trade Alert: BUY ETC",
            "text": "Trade Executed",
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = HttpMailNotifier::new(relay(&server), Some(credentials()), "ops@example.com");
    notifier.send("Trade Alert: BUY ETC", "Trade Executed").await.unwrap();
}

#[tokio::test]
async fn test_relay_failure_is_contained() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let notifier = HttpMailNotifier::new(relay(&server), None, "ops@example.com");
    assert!(matches!(
        notifier.send("subject", "body").await,
        Err(NotifyError::Status(500))
    ));
    assert!(!notify_best_effort(&notifier, "subject", "body").await);
}
