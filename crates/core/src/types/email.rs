//! Account email addresses.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Longest address an SMTP path allows.
const MAX_LEN: usize = 254;

/// Why an address was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Empty,
    #[error("email is longer than {MAX_LEN} characters")]
    TooLong,
    /// Not of the form `name@domain`.
    #[error("{0:?} is not of the form name@domain")]
    Malformed(String),
}

/// A sign-in address, trimmed of surrounding whitespace.
///
/// Only the shape is checked: a non-empty name and domain around a single
/// `@`, with no whitespace. Account lookups compare addresses with
/// [`Email::matches`], which ignores ASCII case.
///
/// ```
/// use forgotten_essentials_core::Email;
///
/// let email = Email::parse("  Kim@Example.com ").unwrap();
/// assert_eq!(email.local_part(), "Kim");
/// assert!(email.matches("kim@example.com"));
/// assert!(Email::parse("kim@").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// # Errors
    ///
    /// Returns an [`EmailError`] when the trimmed input is empty, too long,
    /// or not of the form `name@domain`.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let address = input.trim();
        if address.is_empty() {
            return Err(EmailError::Empty);
        }
        if address.len() > MAX_LEN {
            return Err(EmailError::TooLong);
        }

        let well_formed = !address.contains(char::is_whitespace)
            && address
                .split_once('@')
                .is_some_and(|(name, domain)| {
                    !name.is_empty() && !domain.is_empty() && !domain.contains('@')
                });
        if !well_formed {
            return Err(EmailError::Malformed(address.to_string()));
        }

        Ok(Self(address.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or(self.0.as_str(), |(name, _)| name)
    }

    /// Whether `other` names the same mailbox, ignoring ASCII case and
    /// surrounding whitespace.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
