//! SendGrid API provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_relay::providers::SendGridMailer;
//!
//! let mailer = SendGridMailer::new("SG.xxxxx");
//! ```
//!
//! The sender must be a verified SendGrid sender identity.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::email::Email;
use crate::error::MailError;
use crate::mailer::{require_envelope, DeliveryResult, Mailer};

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3";

/// Default sender when `SENDER_EMAIL` is not set.
pub const SENDGRID_DEFAULT_SENDER: &str = "portfolio@yourdomain.com";

/// SendGrid API email provider.
pub struct SendGridMailer {
    api_key: String,
    client: Client,
    base_url: String,
}

impl SendGridMailer {
    /// Create a new SendGrid mailer with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(api_key, Client::new())
    }

    /// Create with a custom reqwest client.
    pub fn with_client(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
            base_url: SENDGRID_API_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn build_request(&self, email: &Email) -> Result<SendGridRequest, MailError> {
        require_envelope(email)?;
        let from = email.from.as_ref().ok_or(MailError::MissingField("from"))?;

        // SendGrid requires text/plain to precede text/html.
        let mut content = Vec::new();
        if let Some(ref text) = email.text_body {
            content.push(SendGridContent {
                content_type: "text/plain".to_string(),
                value: text.clone(),
            });
        }
        if let Some(ref html) = email.html_body {
            content.push(SendGridContent {
                content_type: "text/html".to_string(),
                value: html.clone(),
            });
        }

        Ok(SendGridRequest {
            personalizations: vec![SendGridPersonalization {
                to: email.to.iter().map(SendGridAddress::from).collect(),
                subject: email.subject.clone(),
            }],
            from: from.into(),
            reply_to: email.reply_to.first().map(SendGridAddress::from),
            subject: email.subject.clone(),
            content,
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn deliver(&self, email: &Email) -> Result<DeliveryResult, MailError> {
        let request = self.build_request(email)?;

        let url = format!("{}/mail/send", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("User-Agent", format!("contact-relay/{}", crate::VERSION))
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        // SendGrid returns 202 Accepted on success with no body
        if status.is_success() {
            let message_id = response
                .headers()
                .get("X-Message-Id")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

            Ok(DeliveryResult::with_response(
                message_id,
                serde_json::json!({ "provider": "sendgrid" }),
            ))
        } else {
            let error: SendGridError = response.json().await.unwrap_or(SendGridError {
                errors: vec![SendGridErrorDetail {
                    message: "Unknown error".to_string(),
                }],
            });

            let error_msg = error
                .errors
                .iter()
                .map(|e| e.message.clone())
                .collect::<Vec<_>>()
                .join("; ");

            Err(MailError::provider_with_status(
                "sendgrid",
                error_msg,
                status.as_u16(),
            ))
        }
    }

    fn provider_name(&self) -> &'static str {
        "sendgrid"
    }
}

// ============================================================================
// SendGrid API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct SendGridRequest {
    personalizations: Vec<SendGridPersonalization>,
    from: SendGridAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<SendGridAddress>,
    subject: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    content: Vec<SendGridContent>,
}

#[derive(Debug, Serialize)]
struct SendGridPersonalization {
    to: Vec<SendGridAddress>,
    subject: String,
}

#[derive(Debug, Serialize)]
struct SendGridAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<&Address> for SendGridAddress {
    fn from(addr: &Address) -> Self {
        Self {
            email: addr.email.clone(),
            name: addr.display_name().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendGridContent {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SendGridError {
    errors: Vec<SendGridErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct SendGridErrorDetail {
    message: String,
}
