use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use futures::FutureExt;

use crate::app::dto::ErrorEnvelope;
use crate::app::errors::ApiError;

/// Upper bound on how much of an untagged error body is read back.
const MAX_FAULT_BODY: usize = 64 * 1024;

/// Outermost middleware: every failure leaves here as a JSON envelope.
///
/// - successful responses pass through untouched
/// - a tagged [`ApiError`] is rendered by [`render`]
/// - untagged 4xx responses (unknown route, wrong method, framework
///   rejections) become an explicit HTTP failure with that status
/// - untagged 5xx responses and panics become an internal fault
pub async fn error_normalizing(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let mut response = match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            let err = ApiError::Internal(panic_message(&*panic));
            tracing::error!(%method, %path, error = %err, "handler panicked");
            return render(&err);
        }
    };

    let tagged = response.extensions_mut().remove::<ApiError>();
    let err = match tagged {
        Some(err) => err,
        None => {
            let status = response.status();
            if status.is_server_error() {
                ApiError::Internal(fault_message(response).await)
            } else if status.is_client_error() {
                ApiError::Http { status }
            } else {
                return response;
            }
        }
    };

    if err.status().is_server_error() {
        tracing::error!(%method, %path, status = err.status().as_u16(), error = %err, "request failed");
    } else {
        tracing::warn!(%method, %path, status = err.status().as_u16(), error = %err, "request rejected");
    }

    render(&err)
}

/// Build the wire envelope for a failure.
pub fn render(err: &ApiError) -> Response {
    let status = err.status();
    let envelope = match err {
        ApiError::Validation(fields) => ErrorEnvelope {
            status: "bad request",
            message: err.to_string(),
            data: Some(fields.to_value()),
        },
        ApiError::Internal(message) => ErrorEnvelope {
            status: "internal server error",
            message: message.clone(),
            data: None,
        },
        _ => ErrorEnvelope {
            status: "error",
            message: err.to_string(),
            data: None,
        },
    };

    (status, Json(envelope)).into_response()
}

async fn fault_message(response: Response) -> String {
    let status = response.status();
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Internal Server Error")
            .to_string()
    };

    match body::to_bytes(response.into_body(), MAX_FAULT_BODY).await {
        Ok(bytes) if !bytes.is_empty() => String::from_utf8_lossy(&bytes).into_owned(),
        _ => fallback(),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
