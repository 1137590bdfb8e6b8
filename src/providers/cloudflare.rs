//! Cloudflare Email Workers provider.
//!
//! Cloudflare's `send_email` binding is only reachable from inside a Worker,
//! so this provider posts the message to a small relay Worker that owns the
//! binding and forwards it through Email Routing. The relay receives:
//!
//! ```json
//! {"from": "...", "to": "...", "reply_to": "...", "subject": "...", "content": "..."}
//! ```
//!
//! and must answer 2xx once the binding accepted the message.
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_relay::providers::CloudflareMailer;
//!
//! let mailer = CloudflareMailer::new("https://mail-relay.example.workers.dev/send")
//!     .token("shared-secret");
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::email::Email;
use crate::error::MailError;
use crate::mailer::{require_envelope, DeliveryResult, Mailer};

/// Default sender when `SENDER_EMAIL` is not set.
pub const CLOUDFLARE_DEFAULT_SENDER: &str = "portfolio@yourdomain.com";

/// Cloudflare Email Workers relay provider.
pub struct CloudflareMailer {
    endpoint: String,
    token: Option<String>,
    client: Client,
}

impl CloudflareMailer {
    /// Create a mailer posting to the given relay Worker URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    /// Create with a custom reqwest client.
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            client,
        }
    }

    /// Bearer token the relay Worker expects.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn build_request(&self, email: &Email) -> Result<CloudflareRequest, MailError> {
        require_envelope(email)?;
        let from = email.from.as_ref().ok_or(MailError::MissingField("from"))?;
        let to = email.to.first().ok_or(MailError::MissingField("to"))?;

        let content = email
            .text_body
            .clone()
            .or_else(|| email.html_body.clone())
            .unwrap_or_default();

        Ok(CloudflareRequest {
            from: from.email.clone(),
            to: to.email.clone(),
            reply_to: email.reply_to.first().map(|a| a.email.clone()),
            subject: email.subject.clone(),
            content,
        })
    }
}

#[async_trait]
impl Mailer for CloudflareMailer {
    async fn deliver(&self, email: &Email) -> Result<DeliveryResult, MailError> {
        let request = self.build_request(email)?;

        let mut req = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("User-Agent", format!("contact-relay/{}", crate::VERSION));

        if let Some(ref token) = self.token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let response = req.json(&request).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(DeliveryResult::with_response(
                uuid::Uuid::new_v4().to_string(),
                serde_json::json!({ "provider": "cloudflare" }),
            ))
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body
            };
            Err(MailError::provider_with_status(
                "cloudflare",
                message,
                status.as_u16(),
            ))
        }
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}

#[derive(Debug, Serialize)]
struct CloudflareRequest {
    from: String,
    to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<String>,
    subject: String,
    content: String,
}
