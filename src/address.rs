//! Email address type with optional display name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An email address with an optional display name.
///
/// # Examples
///
/// ```
/// use contact_relay::Address;
///
/// // From email string
/// let addr: Address = "owner@example.com".into();
/// assert_eq!(addr.email, "owner@example.com");
/// assert_eq!(addr.name, None);
///
/// // From tuple (name, email)
/// let addr: Address = ("Portfolio Owner", "owner@example.com").into();
/// assert_eq!(addr.name, Some("Portfolio Owner".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Optional display name (e.g., "Portfolio Owner")
    pub name: Option<String>,
    /// Email address (e.g., "owner@example.com")
    pub email: String,
}

impl Address {
    /// Create a new address with just an email.
    ///
    /// Addresses that fail a basic sanity check (non-empty, contains @) are
    /// still accepted, but a warning is logged. Submitted reply-to
    /// addresses are never rejected here; the provider has the final word.
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();

        if !Self::basic_sanity_check(&email) {
            tracing::warn!(email = %email, "Creating address with potentially invalid email");
        }

        Self { name: None, email }
    }

    /// Create a new address with a name and email.
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        let email = email.into();

        if !Self::basic_sanity_check(&email) {
            tracing::warn!(email = %email, "Creating address with potentially invalid email");
        }

        Self {
            name: Some(name.into()),
            email,
        }
    }

    fn basic_sanity_check(email: &str) -> bool {
        !email.is_empty() && email.contains('@')
    }

    /// Display name, treating an empty name as absent.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Format as `Name <email>` or just `email`.
    pub fn formatted(&self) -> String {
        match self.display_name() {
            Some(name) => format!("{} <{}>", name, self.email),
            None => self.email.clone(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl From<&str> for Address {
    fn from(email: &str) -> Self {
        Self::new(email)
    }
}

impl From<String> for Address {
    fn from(email: String) -> Self {
        Self::new(email)
    }
}

impl From<(&str, &str)> for Address {
    fn from((name, email): (&str, &str)) -> Self {
        Self::with_name(name, email)
    }
}

impl From<(String, String)> for Address {
    fn from((name, email): (String, String)) -> Self {
        Self::with_name(name, email)
    }
}

/// Trait for types that can be converted to an email address.
///
/// Used by the [`Email`](crate::Email) builder so callers can pass strings,
/// `(name, email)` tuples or an [`Address`] interchangeably.
pub trait ToAddress {
    fn to_address(&self) -> Address;
}

impl<T: ToAddress + ?Sized> ToAddress for &T {
    fn to_address(&self) -> Address {
        (*self).to_address()
    }
}

impl ToAddress for Address {
    fn to_address(&self) -> Address {
        self.clone()
    }
}

impl ToAddress for str {
    fn to_address(&self) -> Address {
        Address::new(self)
    }
}

impl ToAddress for String {
    fn to_address(&self) -> Address {
        Address::new(self)
    }
}

impl<N: AsRef<str>, E: AsRef<str>> ToAddress for (N, E) {
    fn to_address(&self) -> Address {
        Address::with_name(self.0.as_ref(), self.1.as_ref())
    }
}
