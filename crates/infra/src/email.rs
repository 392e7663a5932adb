//! Outbound email through an external sending API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EmailConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Result of a send attempt. Failures are data, never panics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn sent() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> SendOutcome;
}

/// Request body of the sending API.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

pub struct HttpEmailSender {
    http: reqwest::Client,
    config: EmailConfig,
}

impl HttpEmailSender {
    pub fn new(config: EmailConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }
}

#[async_trait::async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, message: &EmailMessage) -> SendOutcome {
        let body = SendRequest {
            from: &self.config.from,
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
        };

        let response = match self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return SendOutcome::failed(format!("request failed: {e}")),
        };

        let status = response.status();
        if status.is_success() {
            SendOutcome::sent()
        } else {
            let text = response.text().await.unwrap_or_default();
            SendOutcome::failed(format!("email API returned {status}: {text}"))
        }
    }
}

/// Canned HTML message used to check the email integration end to end.
pub fn test_message(to: &str, sent_at: DateTime<Utc>) -> EmailMessage {
    let stamp = sent_at.to_rfc3339();
    EmailMessage {
        to: to.to_string(),
        subject: "Innkeep email test".to_string(),
        html: format!(
            "<h1>Innkeep email test</h1>\
             <p>If you can read this, outbound email is configured correctly.</p>\
             <p><small>Sent at {stamp}</small></p>"
        ),
    }
}

/// Send [`test_message`] to `to` and log how it went.
pub async fn send_test_email(sender: &dyn EmailSender, to: &str) -> SendOutcome {
    let message = test_message(to, Utc::now());
    tracing::info!(to = %message.to, subject = %message.subject, "sending test email");

    let outcome = sender.send(&message).await;
    match &outcome.error {
        None if outcome.success => tracing::info!(to = %message.to, "test email sent"),
        error => tracing::error!(to = %message.to, error = ?error, "test email failed"),
    }
    outcome
}
