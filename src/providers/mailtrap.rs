//! Mailtrap API provider.
//!
//! For reference: [Mailtrap API docs](https://api-docs.mailtrap.io/docs/mailtrap-api-docs/67f1d70aeb62c-send-email)
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_relay::providers::MailtrapMailer;
//!
//! let mailer = MailtrapMailer::new("your-api-key");
//! ```
//!
//! ## Sandbox Mode
//!
//! ```rust,ignore
//! let mailer = MailtrapMailer::new("your-api-key")
//!     .sandbox_inbox_id("111111");
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::email::Email;
use crate::error::MailError;
use crate::mailer::{require_envelope, DeliveryResult, Mailer};

const MAILTRAP_BASE_URL: &str = "https://send.api.mailtrap.io";
const MAILTRAP_SANDBOX_BASE_URL: &str = "https://sandbox.api.mailtrap.io";
const MAILTRAP_API_ENDPOINT: &str = "/api/send";

/// Default sender when `SENDER_EMAIL` is not set. Mailtrap's demo domain.
pub const MAILTRAP_DEFAULT_SENDER: &str = "portfolio@demomailtrap.com";
pub const MAILTRAP_DEFAULT_SENDER_NAME: &str = "Portfolio Contact Form";

/// Mailtrap API email provider.
pub struct MailtrapMailer {
    api_key: String,
    base_url: Option<String>,
    sandbox_inbox_id: Option<String>,
    client: Client,
}

impl MailtrapMailer {
    /// Create a new Mailtrap mailer with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(api_key, Client::new())
    }

    /// Create with a custom reqwest client.
    pub fn with_client(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            sandbox_inbox_id: None,
            client,
        }
    }

    /// Set a custom base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Enable sandbox mode with the given inbox ID.
    pub fn sandbox_inbox_id(mut self, inbox_id: impl Into<String>) -> Self {
        self.sandbox_inbox_id = Some(inbox_id.into());
        self
    }

    fn prepare_url(&self) -> String {
        if let Some(ref inbox_id) = self.sandbox_inbox_id {
            let base = self
                .base_url
                .as_deref()
                .unwrap_or(MAILTRAP_SANDBOX_BASE_URL);
            format!("{}{}/{}", base, MAILTRAP_API_ENDPOINT, inbox_id)
        } else {
            let base = self.base_url.as_deref().unwrap_or(MAILTRAP_BASE_URL);
            format!("{}{}", base, MAILTRAP_API_ENDPOINT)
        }
    }

    fn build_request(&self, email: &Email) -> Result<MailtrapRequest, MailError> {
        require_envelope(email)?;
        let from = email.from.as_ref().ok_or(MailError::MissingField("from"))?;

        Ok(MailtrapRequest {
            from: from.into(),
            to: email.to.iter().map(MailtrapEmailItem::from).collect(),
            reply_to: email.reply_to.first().map(MailtrapEmailItem::from),
            subject: email.subject.clone(),
            text: email.text_body.clone(),
            html: email.html_body.clone(),
        })
    }
}

#[async_trait]
impl Mailer for MailtrapMailer {
    async fn deliver(&self, email: &Email) -> Result<DeliveryResult, MailError> {
        let request = self.build_request(email)?;
        let url = self.prepare_url();

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("User-Agent", format!("contact-relay/{}", crate::VERSION))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let result: MailtrapResponse = response.json().await.unwrap_or_default();
            let message_id = result
                .message_ids
                .first()
                .cloned()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

            Ok(DeliveryResult::with_response(
                message_id,
                serde_json::json!({
                    "provider": "mailtrap",
                    "message_ids": result.message_ids,
                }),
            ))
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<MailtrapError>(&body)
                .ok()
                .filter(|e| !e.errors.is_empty())
                .map(|e| e.errors.join("; "))
                .unwrap_or(body);
            Err(MailError::provider_with_status(
                "mailtrap",
                message,
                status.as_u16(),
            ))
        }
    }

    fn provider_name(&self) -> &'static str {
        "mailtrap"
    }
}

// ============================================================================
// Mailtrap API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct MailtrapRequest {
    from: MailtrapEmailItem,
    to: Vec<MailtrapEmailItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<MailtrapEmailItem>,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

#[derive(Debug, Serialize)]
struct MailtrapEmailItem {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<&Address> for MailtrapEmailItem {
    fn from(addr: &Address) -> Self {
        Self {
            email: addr.email.clone(),
            name: addr.display_name().map(str::to_string),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct MailtrapResponse {
    #[serde(default)]
    message_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MailtrapError {
    #[serde(default)]
    errors: Vec<String>,
}
