//! Mailer trait and delivery result types.
//!
//! `#[async_trait]` is used instead of native async traits because the relay
//! picks its provider at startup and shares it as `Arc<dyn Mailer>`; native
//! async trait methods are not object-safe. The one boxed future per delivery
//! is noise next to the outbound HTTPS call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::email::Email;
use crate::error::MailError;

/// Result of a successful email delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Message ID assigned by the provider
    pub message_id: String,
    /// Optional provider-specific response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<serde_json::Value>,
}

impl DeliveryResult {
    /// Create a new delivery result with just a message ID.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: None,
        }
    }

    /// Create a delivery result with provider response.
    pub fn with_response(message_id: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: Some(response),
        }
    }
}

/// Trait for email delivery providers.
///
/// Every provider the relay can forward to (Mailtrap, Resend, Cloudflare,
/// SendGrid) implements this trait.
///
/// # Example
///
/// ```ignore
/// use contact_relay::{Email, Mailer};
/// use contact_relay::providers::ResendMailer;
///
/// let mailer = ResendMailer::new("re_xxxxx");
///
/// let email = Email::new()
///     .from("portfolio@yourdomain.com")
///     .to("owner@example.com")
///     .subject("Hello")
///     .text_body("World");
///
/// let result = mailer.deliver(&email).await?;
/// println!("Sent with ID: {}", result.message_id);
/// ```
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single email.
    ///
    /// Makes exactly one outbound request. Nothing is retried.
    async fn deliver(&self, email: &Email) -> Result<DeliveryResult, MailError>;

    /// Get the provider name (for logging/debugging).
    fn provider_name(&self) -> &'static str {
        "unknown"
    }
}

/// Check the fields every provider needs before building a request.
pub(crate) fn require_envelope(email: &Email) -> Result<(), MailError> {
    if email.from.is_none() {
        return Err(MailError::MissingField("from"));
    }
    if email.to.is_empty() {
        return Err(MailError::MissingField("to"));
    }
    Ok(())
}
