use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};

use crm_core::User;

use crate::app::dto::{self, CreateUserRequest, GetUserQuery, OkEnvelope, UserData, UserDto, UsersData};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::app::validation::{ValidJson, ValidQuery};

type ApiResult<T> = Result<Json<OkEnvelope<T>>, ApiError>;

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    ValidJson(body): ValidJson<CreateUserRequest>,
) -> ApiResult<UserData> {
    let user = User::register(body.email);
    let dto = UserDto::from(&user);
    services.users().add_user(user).await?;

    tracing::info!(user_id = %dto.id, "user created");
    Ok(dto::ok(UserData { user: dto }))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> ApiResult<UsersData> {
    require_basic_auth(&services, &headers)?;

    let users = services
        .users()
        .list_users()
        .await?
        .iter()
        .map(UserDto::from)
        .collect();
    Ok(dto::ok(UsersData { users }))
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    ValidQuery(query): ValidQuery<GetUserQuery>,
) -> ApiResult<UserData> {
    require_basic_auth(&services, &headers)?;

    let user = services
        .users()
        .get_user(&query.id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(dto::ok(UserData {
        user: UserDto::from(&user),
    }))
}

fn require_basic_auth(services: &AppServices, headers: &HeaderMap) -> Result<(), ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()));

    crm_auth::authenticate(header.as_deref(), services.credentials())?;
    Ok(())
}
