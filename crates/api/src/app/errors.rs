//! Failure taxonomy shared by extractors and handlers.
//!
//! An [`ApiError`] does not render its own body. Converting it into a response
//! only sets the status code and stashes the error in the response
//! extensions; [`crate::middleware::error_normalizing`] turns it into the JSON
//! envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crm_auth::AuthError;
use crm_infra::AccessorError;

use crate::app::validation::FieldErrors;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Payload shape rejected before the handler ran.
    #[error("invalid data")]
    Validation(FieldErrors),

    /// No `Authorization` header.
    #[error("Unauthorized")]
    AuthenticationMissing,

    /// `Authorization` header present but credentials do not match.
    #[error("Forbidden")]
    CredentialsRejected,

    #[error("Not Found")]
    NotFound,

    /// Any other explicit HTTP failure.
    #[error("{}", .status.canonical_reason().unwrap_or("Error"))]
    Http { status: StatusCode },

    /// Unanticipated fault; the message is returned to the caller as-is.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationMissing => StatusCode::UNAUTHORIZED,
            Self::CredentialsRejected => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Http { status } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Missing => Self::AuthenticationMissing,
            AuthError::Rejected => Self::CredentialsRejected,
        }
    }
}

impl From<AccessorError> for ApiError {
    fn from(err: AccessorError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status().into_response();
        response.extensions_mut().insert(self);
        response
    }
}
