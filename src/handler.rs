//! HTTP surface: one handler serving every path.
//!
//! | Method | Response |
//! |--------|----------|
//! | `OPTIONS` | 200, empty body |
//! | `POST` | JSON body `{name, email, message}` relayed to the configured provider |
//! | anything else | 405 `Method not allowed` |
//!
//! Every response carries the CORS headers, including error responses
//! produced by axum itself.

use axum::{
    body,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::Instrument;

use crate::config::RelayConfig;
use crate::error::MailError;
use crate::mailer::DeliveryResult;
use crate::notification;
use crate::providers::{self, SelectedProvider};
use crate::submission::{Submission, SubmissionError};

pub const SUCCESS_MESSAGE: &str = "Email sent successfully";
pub const MISSING_FIELDS_ERROR: &str = "Missing required fields";
pub const SEND_FAILED_ERROR: &str = "Failed to send email";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

/// Largest POST body read; anything bigger is answered like a malformed body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<RelayConfig>,
    provider: Result<SelectedProvider, MailError>,
}

impl AppState {
    /// Build state with an explicit provider (or the reason there is none).
    pub fn new(config: RelayConfig, provider: Result<SelectedProvider, MailError>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    /// Select the provider from `config`.
    ///
    /// A missing or broken provider does not stop the relay from starting;
    /// every submission is answered with a 500 until it is fixed.
    pub fn from_config(config: RelayConfig) -> Self {
        let provider = match providers::select(&config) {
            Some(Ok(provider)) => {
                tracing::info!(
                    provider = provider.kind.name(),
                    sender = %provider.sender,
                    recipient = %config.recipient,
                    "Email provider configured"
                );
                Ok(provider)
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "Email provider misconfigured");
                Err(e)
            }
            None => {
                tracing::warn!("No email service configured; submissions will fail");
                Err(MailError::NotConfigured)
            }
        };
        Self::new(config, provider)
    }

    pub fn provider(&self) -> Option<&SelectedProvider> {
        self.provider.as_ref().ok()
    }
}

/// JSON body of every POST outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Everything that can go wrong while handling a request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Malformed request body: {0}")]
    Malformed(serde_json::Error),

    #[error("Failed to read request body: {0}")]
    Body(axum::Error),

    #[error(transparent)]
    Delivery(#[from] MailError),
}

impl From<SubmissionError> for RelayError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Malformed(e) => Self::Malformed(e),
            SubmissionError::MissingFields => Self::MissingFields,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED).into_response()
            }
            RelayError::MissingFields => (
                StatusCode::BAD_REQUEST,
                Json(ContactResponse::failure(MISSING_FIELDS_ERROR)),
            )
                .into_response(),
            RelayError::Malformed(_) | RelayError::Body(_) | RelayError::Delivery(_) => {
                tracing::error!(error = %self, "Email sending error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ContactResponse::failure(SEND_FAILED_ERROR)),
                )
                    .into_response()
            }
        }
    }
}

/// Build the relay router.
pub fn router(state: AppState) -> Router {
    let origin = HeaderValue::from_str(&state.config.allowed_origin).unwrap_or_else(|_| {
        tracing::warn!(
            origin = %state.config.allowed_origin,
            "ALLOWED_ORIGIN is not a valid header value, falling back to *"
        );
        HeaderValue::from_static("*")
    });

    Router::new()
        .fallback(contact)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Any method, any path. The body is only read for POST.
async fn contact(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => match relay(&state, request).await {
            Ok(_) => (
                StatusCode::OK,
                Json(ContactResponse::success(SUCCESS_MESSAGE)),
            )
                .into_response(),
            Err(e) => e.into_response(),
        },
        _ => RelayError::MethodNotAllowed.into_response(),
    }
}

async fn relay(state: &AppState, request: Request) -> Result<DeliveryResult, RelayError> {
    let bytes = body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(RelayError::Body)?;
    submit(state, &bytes).await
}

/// Parse, compose and deliver one submission.
pub async fn submit(state: &AppState, body: &[u8]) -> Result<DeliveryResult, RelayError> {
    let submission = Submission::from_json(body)?;
    let provider = state.provider.as_ref().map_err(Clone::clone)?;

    let email = notification::compose(&submission, &provider.sender, &state.config.recipient);

    let span = tracing::info_span!(
        "contact_relay.deliver",
        provider = provider.mailer.provider_name(),
        to = %state.config.recipient.email,
        subject = %email.subject,
    );

    async {
        tracing::debug!("Delivering email");
        let result = provider.mailer.deliver(&email).await?;
        tracing::info!(message_id = %result.message_id, "Email delivered");
        Ok::<_, RelayError>(result)
    }
    .instrument(span)
    .await
}
