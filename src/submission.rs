//! Contact-form submission parsing.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors produced while reading a submission from a request body.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The body is not valid JSON.
    #[error("Malformed JSON body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// `name`, `email` or `message` is absent, not a string, or empty.
    #[error("Missing required fields")]
    MissingFields,
}

/// The name/email/message triple posted by a contact form.
///
/// Lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Submission {
    /// Create a submission directly (mainly for tests and callers that have
    /// already validated their input).
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Parse and validate a JSON request body.
    ///
    /// Extra fields are ignored. Whitespace-only values count as present.
    pub fn from_json(body: &[u8]) -> Result<Self, SubmissionError> {
        let value: Value = serde_json::from_slice(body)?;

        let name = required(&value, "name");
        let email = required(&value, "email");
        let message = required(&value, "message");

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(Self::new(name, email, message)),
            _ => Err(SubmissionError::MissingFields),
        }
    }
}

fn required<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
