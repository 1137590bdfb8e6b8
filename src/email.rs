//! Outbound notification email with builder pattern.

use serde::{Deserialize, Serialize};

use crate::address::{Address, ToAddress};

/// An email message handed to a [`Mailer`](crate::Mailer).
///
/// ```
/// use contact_relay::Email;
///
/// let email = Email::new()
///     .from("portfolio@yourdomain.com")
///     .to(("Portfolio Owner", "owner@example.com"))
///     .reply_to(("Ada", "ada@example.com"))
///     .subject("Portfolio Contact - Message from Ada")
///     .text_body("Hello");
///
/// assert_eq!(email.to[0].formatted(), "Portfolio Owner <owner@example.com>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Email {
    /// Sender address
    pub from: Option<Address>,
    /// Primary recipients
    pub to: Vec<Address>,
    /// Reply-to addresses
    pub reply_to: Vec<Address>,
    /// Email subject line
    pub subject: String,
    /// Plain text body
    pub text_body: Option<String>,
    /// HTML body
    pub html_body: Option<String>,
}

impl Email {
    /// Create a new empty email.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender address.
    pub fn from(mut self, addr: impl ToAddress) -> Self {
        self.from = Some(addr.to_address());
        self
    }

    /// Add a recipient.
    pub fn to(mut self, addr: impl ToAddress) -> Self {
        self.to.push(addr.to_address());
        self
    }

    /// Add a reply-to address.
    pub fn reply_to(mut self, addr: impl ToAddress) -> Self {
        self.reply_to.push(addr.to_address());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the plain text body.
    pub fn text_body(mut self, body: impl Into<String>) -> Self {
        self.text_body = Some(body.into());
        self
    }

    /// Set the HTML body.
    pub fn html_body(mut self, body: impl Into<String>) -> Self {
        self.html_body = Some(body.into());
        self
    }
}
