//! Decoding of `Authorization: Basic <base64(user:pass)>` header values.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

const SCHEME_PREFIX: &str = "Basic ";

/// Username/password pair carried by a Basic `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Decode a raw header value.
    ///
    /// Returns `None` when the scheme prefix is missing, the payload is not
    /// valid base64 or UTF-8, or there is no `:` separator. The password is
    /// everything after the first `:`.
    pub fn decode(header_value: &str) -> Option<Self> {
        let encoded = header_value.strip_prefix(SCHEME_PREFIX)?.trim();
        let bytes = STANDARD.decode(encoded).ok()?;
        let decoded = String::from_utf8(bytes).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Encode as a full header value (`Basic ...`).
    pub fn to_header_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("{SCHEME_PREFIX}{}", STANDARD.encode(raw))
    }
}

/// Check a raw `Authorization` header value against the expected credentials.
///
/// Any decoding failure yields `false`. Comparison is plain string equality.
pub fn check_basic_auth(header_value: &str, expected_username: &str, expected_password: &str) -> bool {
    match BasicCredentials::decode(header_value) {
        Some(creds) => creds.username == expected_username && creds.password == expected_password,
        None => false,
    }
}
