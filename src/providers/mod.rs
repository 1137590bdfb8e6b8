//! Email provider implementations and provider selection.
//!
//! Each provider implements the [`Mailer`](crate::Mailer) trait.
//!
//! ## Available Providers
//!
//! Listed in selection priority. The first provider whose credential is
//! configured wins.
//!
//! | Provider | Feature Flag | Credential |
//! |----------|-------------|------------|
//! | [`MailtrapMailer`] | `mailtrap` | `MAILTRAP_API_KEY` |
//! | [`ResendMailer`] | `resend` | `RESEND_API_KEY` |
//! | [`CloudflareMailer`] | `cloudflare` | `CLOUDFLARE_EMAIL_ENABLED` |
//! | [`SendGridMailer`] | `sendgrid` | `SENDGRID_API_KEY` |

#[cfg(feature = "mailtrap")]
mod mailtrap;
#[cfg(feature = "mailtrap")]
pub use mailtrap::MailtrapMailer;

#[cfg(feature = "resend")]
mod resend;
#[cfg(feature = "resend")]
pub use resend::ResendMailer;

#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareMailer;

#[cfg(feature = "sendgrid")]
mod sendgrid;
#[cfg(feature = "sendgrid")]
pub use sendgrid::SendGridMailer;

use std::fmt;
use std::sync::Arc;

use crate::address::Address;
use crate::config::RelayConfig;
use crate::error::MailError;
use crate::mailer::Mailer;

/// The providers the relay knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Mailtrap,
    Resend,
    Cloudflare,
    SendGrid,
}

impl ProviderKind {
    /// Selection order.
    pub const PRIORITY: [ProviderKind; 4] = [
        ProviderKind::Mailtrap,
        ProviderKind::Resend,
        ProviderKind::Cloudflare,
        ProviderKind::SendGrid,
    ];

    /// Name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::Mailtrap => "mailtrap",
            ProviderKind::Resend => "resend",
            ProviderKind::Cloudflare => "cloudflare",
            ProviderKind::SendGrid => "sendgrid",
        }
    }

    /// Environment variable whose presence selects this provider.
    pub fn credential_var(self) -> &'static str {
        match self {
            ProviderKind::Mailtrap => "MAILTRAP_API_KEY",
            ProviderKind::Resend => "RESEND_API_KEY",
            ProviderKind::Cloudflare => "CLOUDFLARE_EMAIL_ENABLED",
            ProviderKind::SendGrid => "SENDGRID_API_KEY",
        }
    }

    /// Whether the provider is compiled in.
    pub fn is_compiled(self) -> bool {
        match self {
            ProviderKind::Mailtrap => cfg!(feature = "mailtrap"),
            ProviderKind::Resend => cfg!(feature = "resend"),
            ProviderKind::Cloudflare => cfg!(feature = "cloudflare"),
            ProviderKind::SendGrid => cfg!(feature = "sendgrid"),
        }
    }

    /// Whether the provider's credential is present in `config`.
    pub fn has_credential(self, config: &RelayConfig) -> bool {
        match self {
            ProviderKind::Mailtrap => config.mailtrap_api_key.is_some(),
            ProviderKind::Resend => config.resend_api_key.is_some(),
            ProviderKind::Cloudflare => config.cloudflare_email_enabled,
            ProviderKind::SendGrid => config.sendgrid_api_key.is_some(),
        }
    }

    /// Build the mailer and resolve the sender address for this provider.
    pub fn build(self, config: &RelayConfig) -> Result<SelectedProvider, MailError> {
        match self {
            #[cfg(feature = "mailtrap")]
            ProviderKind::Mailtrap => {
                let key = config
                    .mailtrap_api_key
                    .as_deref()
                    .ok_or_else(|| MailError::Configuration("MAILTRAP_API_KEY not set".into()))?;
                let mut mailer = MailtrapMailer::new(key);
                if let Some(ref inbox_id) = config.mailtrap_sandbox_inbox_id {
                    mailer = mailer.sandbox_inbox_id(inbox_id);
                }
                if let Some(ref url) = config.mailtrap_base_url {
                    mailer = mailer.base_url(url);
                }
                Ok(SelectedProvider::new(
                    self,
                    Arc::new(mailer),
                    config.sender(
                        mailtrap::MAILTRAP_DEFAULT_SENDER,
                        Some(mailtrap::MAILTRAP_DEFAULT_SENDER_NAME),
                    ),
                ))
            }

            #[cfg(feature = "resend")]
            ProviderKind::Resend => {
                let key = config
                    .resend_api_key
                    .as_deref()
                    .ok_or_else(|| MailError::Configuration("RESEND_API_KEY not set".into()))?;
                let mut mailer = ResendMailer::new(key);
                if let Some(ref url) = config.resend_base_url {
                    mailer = mailer.base_url(url);
                }
                Ok(SelectedProvider::new(
                    self,
                    Arc::new(mailer),
                    config.sender(resend::RESEND_DEFAULT_SENDER, None),
                ))
            }

            #[cfg(feature = "cloudflare")]
            ProviderKind::Cloudflare => {
                let endpoint = config.cloudflare_email_endpoint.as_deref().ok_or_else(|| {
                    MailError::Configuration(
                        "CLOUDFLARE_EMAIL_ENABLED is set but CLOUDFLARE_EMAIL_ENDPOINT is not"
                            .into(),
                    )
                })?;
                let mut mailer = CloudflareMailer::new(endpoint);
                if let Some(ref token) = config.cloudflare_email_token {
                    mailer = mailer.token(token);
                }
                Ok(SelectedProvider::new(
                    self,
                    Arc::new(mailer),
                    config.sender(cloudflare::CLOUDFLARE_DEFAULT_SENDER, None),
                ))
            }

            #[cfg(feature = "sendgrid")]
            ProviderKind::SendGrid => {
                let key = config
                    .sendgrid_api_key
                    .as_deref()
                    .ok_or_else(|| MailError::Configuration("SENDGRID_API_KEY not set".into()))?;
                let mut mailer = SendGridMailer::new(key);
                if let Some(ref url) = config.sendgrid_base_url {
                    mailer = mailer.base_url(url);
                }
                Ok(SelectedProvider::new(
                    self,
                    Arc::new(mailer),
                    config.sender(sendgrid::SENDGRID_DEFAULT_SENDER, None),
                ))
            }

            #[allow(unreachable_patterns)]
            other => Err(MailError::Configuration(format!(
                "{} is configured but the '{}' feature is not enabled",
                other.credential_var(),
                other.name()
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ready-to-use provider: the mailer plus the sender it sends as.
#[derive(Clone)]
pub struct SelectedProvider {
    pub kind: ProviderKind,
    pub mailer: Arc<dyn Mailer>,
    pub sender: Address,
}

impl SelectedProvider {
    pub fn new(kind: ProviderKind, mailer: Arc<dyn Mailer>, sender: Address) -> Self {
        Self {
            kind,
            mailer,
            sender,
        }
    }
}

impl fmt::Debug for SelectedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedProvider")
            .field("kind", &self.kind)
            .field("mailer", &self.mailer.provider_name())
            .field("sender", &self.sender)
            .finish()
    }
}

/// Pick the first compiled-in provider whose credential is configured.
///
/// Returns `None` when no credential is present, and `Some(Err(_))` when the
/// winning provider is misconfigured. Lower-priority providers are never
/// consulted once a credential is found.
pub fn select(config: &RelayConfig) -> Option<Result<SelectedProvider, MailError>> {
    let kind = ProviderKind::PRIORITY
        .into_iter()
        .find(|kind| kind.is_compiled() && kind.has_credential(config))?;

    tracing::debug!(provider = kind.name(), "Selected email provider");
    Some(kind.build(config))
}
