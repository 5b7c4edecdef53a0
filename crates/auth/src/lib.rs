//! `crm-auth` — HTTP Basic authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP frameworks and storage: it
//! works on raw `Authorization` header values and configured credentials.

pub mod basic;
pub mod guard;

pub use basic::{BasicCredentials, check_basic_auth};
pub use guard::{AuthError, Credentials, authenticate};
