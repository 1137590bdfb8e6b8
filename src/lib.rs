//! # contact-relay
//!
//! Relay contact-form submissions to a transactional email provider.
//!
//! A browser form POSTs `{name, email, message}`; the relay validates the
//! three fields, composes a notification for the site owner and forwards it
//! through exactly one provider: the first of Mailtrap, Resend, Cloudflare or
//! SendGrid whose credential is configured.
//!
//! ## Quick Start
//!
//! ```bash
//! RECIPIENT_EMAIL=owner@example.com
//! RESEND_API_KEY=re_xxxxx
//! contact-relay
//! ```
//!
//! ## Embedding
//!
//! ```rust,ignore
//! use contact_relay::{router, AppState, RelayConfig};
//!
//! let config = RelayConfig::from_env()?;
//! let app = router(AppState::from_config(config));
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Responses
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | Preflight (`OPTIONS`) | 200 | empty |
//! | Other methods | 405 | `Method not allowed` |
//! | Missing field | 400 | `{"success":false,"error":"Missing required fields"}` |
//! | Delivered | 200 | `{"success":true,"message":"Email sent successfully"}` |
//! | Anything else | 500 | `{"success":false,"error":"Failed to send email"}` |
//!
//! See [`config`] for the environment variables.

/// The version of the contact-relay crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod address;
mod email;
mod error;
mod mailer;

pub mod config;
pub mod handler;
pub mod notification;
pub mod providers;
pub mod submission;

// Re-exports
pub use address::{Address, ToAddress};
pub use config::RelayConfig;
pub use email::Email;
pub use error::MailError;
pub use handler::{router, AppState, ContactResponse, RelayError};
pub use mailer::{DeliveryResult, Mailer};
pub use providers::{ProviderKind, SelectedProvider};
pub use submission::{Submission, SubmissionError};
