use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles"));

#[derive(Debug, Error, PartialEq)]
pub enum EmailError {
    #[error("Email address is not valid")]
    Invalid,
}

/// A validated, normalized email address.
///
/// Addresses are trimmed and lowercased on construction so that lookups and
/// uniqueness checks are case-insensitive. The inner value is wrapped in
/// `Secret` to keep it out of logs.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let normalized = value.expose_secret().trim().to_lowercase();
        if !EMAIL_REGEX.is_match(&normalized) {
            return Err(EmailError::Invalid);
        }
        Ok(Self(Secret::new(normalized)))
    }
}

impl Email {
    /// The normalized address as plain text, for building views and wire bodies.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
