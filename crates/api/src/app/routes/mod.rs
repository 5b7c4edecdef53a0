use axum::{
    routing::{get, post},
    Router,
};

use crate::app::errors::ApiError;

pub mod users;

/// Router for the user directory endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/user", get(users::get_user))
        .fallback(not_found)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
