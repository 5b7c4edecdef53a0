use serde::Serialize;
use serde_json::{Map, Value};

use crm_core::{Entity, User, UserId};

use crate::app::validation::{FieldErrors, FieldReader, Location, ValidatePayload};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub email: String,
}

impl ValidatePayload for CreateUserRequest {
    fn validate(fields: &Map<String, Value>, location: Location) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(fields, location);
        let email = reader.required_str("email");
        reader.reject_unknown(&["email"]);
        reader.finish(|| Some(Self { email: email? }))
    }
}

/// Query of `GET /user`. Unknown parameters are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetUserQuery {
    pub id: UserId,
}

impl ValidatePayload for GetUserQuery {
    fn validate(fields: &Map<String, Value>, location: Location) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(fields, location);
        let id = reader.required_id::<UserId>("id");
        reader.finish(|| Some(Self { id: id? }))
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// Success envelope: `{"status": "ok", "data": ...}`.
#[derive(Debug, Serialize)]
pub struct OkEnvelope<T> {
    pub status: &'static str,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> axum::Json<OkEnvelope<T>> {
    axum::Json(OkEnvelope { status: "ok", data })
}

/// Failure envelope: `{"status": ..., "message": ..., "data"?: ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub email: String,
    pub id: UserId,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            email: user.email().to_string(),
            id: *user.id(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct UsersData {
    pub users: Vec<UserDto>,
}
