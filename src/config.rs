//! Relay configuration loaded from environment variables.
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `RECIPIENT_EMAIL` | Where notifications are sent (default: `your-email@example.com`) |
//! | `RECIPIENT_NAME` | Recipient display name (default: `Portfolio Owner`) |
//! | `SENDER_EMAIL` | Override the provider's default sender address |
//! | `SENDER_NAME` | Override the provider's default sender name |
//! | `MAILTRAP_API_KEY` | Mailtrap API key (priority 1) |
//! | `MAILTRAP_SANDBOX_INBOX_ID` | Mailtrap sandbox inbox ID (optional) |
//! | `RESEND_API_KEY` | Resend API key (priority 2) |
//! | `CLOUDFLARE_EMAIL_ENABLED` | Enable the Cloudflare email relay (priority 3) |
//! | `CLOUDFLARE_EMAIL_ENDPOINT` | URL of the Worker exposing the `send_email` binding |
//! | `CLOUDFLARE_EMAIL_TOKEN` | Bearer token for that Worker (optional) |
//! | `SENDGRID_API_KEY` | SendGrid API key (priority 4) |
//! | `MAILTRAP_BASE_URL`, `RESEND_BASE_URL`, `SENDGRID_BASE_URL` | API base URL overrides |
//! | `ALLOWED_ORIGIN` | CORS allow-origin value (default: `*`) |
//! | `HOST` | Bind address (default: `0.0.0.0`) |
//! | `PORT` | Bind port (default: `8787`) |

use std::env;

use crate::address::Address;
use crate::error::MailError;

pub const DEFAULT_RECIPIENT_EMAIL: &str = "your-email@example.com";
pub const DEFAULT_RECIPIENT_NAME: &str = "Portfolio Owner";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8787;

/// Relay settings. Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Notification recipient
    pub recipient: Address,
    /// Sender address override
    pub sender_email: Option<String>,
    /// Sender display name override
    pub sender_name: Option<String>,

    pub mailtrap_api_key: Option<String>,
    pub mailtrap_sandbox_inbox_id: Option<String>,
    pub mailtrap_base_url: Option<String>,

    pub resend_api_key: Option<String>,
    pub resend_base_url: Option<String>,

    pub cloudflare_email_enabled: bool,
    pub cloudflare_email_endpoint: Option<String>,
    pub cloudflare_email_token: Option<String>,

    pub sendgrid_api_key: Option<String>,
    pub sendgrid_base_url: Option<String>,

    /// Value of `Access-Control-Allow-Origin`
    pub allowed_origin: String,
    pub host: String,
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            recipient: Address::with_name(DEFAULT_RECIPIENT_NAME, DEFAULT_RECIPIENT_EMAIL),
            sender_email: None,
            sender_name: None,
            mailtrap_api_key: None,
            mailtrap_sandbox_inbox_id: None,
            mailtrap_base_url: None,
            resend_api_key: None,
            resend_base_url: None,
            cloudflare_email_enabled: false,
            cloudflare_email_endpoint: None,
            cloudflare_email_token: None,
            sendgrid_api_key: None,
            sendgrid_base_url: None,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl RelayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, MailError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Variables set to the empty string are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                MailError::Configuration(format!("PORT must be a valid port number, got {raw:?}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            recipient: Address::with_name(
                var("RECIPIENT_NAME").unwrap_or_else(|| DEFAULT_RECIPIENT_NAME.to_string()),
                var("RECIPIENT_EMAIL").unwrap_or_else(|| DEFAULT_RECIPIENT_EMAIL.to_string()),
            ),
            sender_email: var("SENDER_EMAIL"),
            sender_name: var("SENDER_NAME"),
            mailtrap_api_key: var("MAILTRAP_API_KEY"),
            mailtrap_sandbox_inbox_id: var("MAILTRAP_SANDBOX_INBOX_ID"),
            mailtrap_base_url: var("MAILTRAP_BASE_URL"),
            resend_api_key: var("RESEND_API_KEY"),
            resend_base_url: var("RESEND_BASE_URL"),
            cloudflare_email_enabled: var("CLOUDFLARE_EMAIL_ENABLED")
                .map(|v| is_enabled(&v))
                .unwrap_or(false),
            cloudflare_email_endpoint: var("CLOUDFLARE_EMAIL_ENDPOINT"),
            cloudflare_email_token: var("CLOUDFLARE_EMAIL_TOKEN"),
            sendgrid_api_key: var("SENDGRID_API_KEY"),
            sendgrid_base_url: var("SENDGRID_BASE_URL"),
            allowed_origin: var("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// Sender address, falling back to the provider's default.
    pub fn sender(&self, default_email: &str, default_name: Option<&str>) -> Address {
        let email = self.sender_email.as_deref().unwrap_or(default_email);
        match self.sender_name.as_deref().or(default_name) {
            Some(name) => Address::with_name(name, email),
            None => Address::new(email),
        }
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_enabled(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}
