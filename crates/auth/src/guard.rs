//! Two-step authentication policy applied by protected handlers.

use thiserror::Error;

use crate::basic::check_basic_auth;

/// Configured username/password the service accepts.
///
/// Stored and compared in plain text.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header was supplied.
    #[error("authentication required")]
    Missing,

    /// A header was supplied but did not carry the expected credentials.
    #[error("credentials rejected")]
    Rejected,
}

/// Authenticate a request from its (optional) `Authorization` header value.
///
/// Presence is checked before validity; an empty value counts as absent.
pub fn authenticate(header_value: Option<&str>, expected: &Credentials) -> Result<(), AuthError> {
    let header_value = match header_value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AuthError::Missing),
    };

    if !check_basic_auth(header_value, &expected.username, &expected.password) {
        return Err(AuthError::Rejected);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BasicCredentials;

    fn expected() -> Credentials {
        Credentials::new("admin", "secret")
    }

    fn header_for(username: &str, password: &str) -> String {
        BasicCredentials {
            username: username.into(),
            password: password.into(),
        }
        .to_header_value()
    }

    #[test]
    fn absent_header_is_missing() {
        assert_eq!(authenticate(None, &expected()), Err(AuthError::Missing));
    }

    #[test]
    fn empty_header_is_missing() {
        assert_eq!(authenticate(Some(""), &expected()), Err(AuthError::Missing));
    }

    #[test]
    fn undecodable_header_is_rejected_not_missing() {
        assert_eq!(authenticate(Some("garbage"), &expected()), Err(AuthError::Rejected));
    }

    #[test]
    fn wrong_credentials_are_rejected() {
        let h = header_for("admin", "wrong");
        assert_eq!(authenticate(Some(&h), &expected()), Err(AuthError::Rejected));
    }

    #[test]
    fn matching_credentials_pass() {
        let h = header_for("admin", "secret");
        assert_eq!(authenticate(Some(&h), &expected()), Ok(()));
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", expected());
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("secret"));
    }
}
