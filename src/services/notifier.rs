//! Operator alerts.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};
use url::Url;

use crate::config::Credentials;
use crate::services::error::NotifyError;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Writes alerts to the log. Used when no mail relay is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        info!(subject = %subject, "Alert: {}\n{}", subject, body);
        Ok(())
    }
}

/// Posts plain-text mail to an HTTP mail relay.
pub struct HttpMailNotifier {
    relay_url: Url,
    credentials: Option<Credentials>,
    recipient: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct MailMessage<'a> {
    from: Option<&'a str>,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailNotifier {
    pub fn new(relay_url: Url, credentials: Option<Credentials>, recipient: impl Into<String>) -> Self {
        Self {
            relay_url,
            credentials,
            recipient: recipient.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for HttpMailNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = MailMessage {
            from: self.credentials.as_ref().map(|c| c.username.as_str()),
            to: &self.recipient,
            subject,
            text: body,
        };

        let mut request = self.client.post(self.relay_url.clone()).json(&message);
        if let Some(ref creds) = self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status().as_u16()));
        }

        info!(subject = %subject, "Alert: email sent");
        Ok(())
    }
}

/// Send an alert, logging any failure. Returns whether delivery succeeded.
pub async fn notify_best_effort(notifier: &dyn Notifier, subject: &str, body: &str) -> bool {
    match notifier.send(subject, body).await {
        Ok(()) => true,
        Err(e) => {
            error!(subject = %subject, error = %e, "Alert: failed to send '{}'", subject);
            false
        }
    }
}
