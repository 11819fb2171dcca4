use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginRequestDto, RegisterRequestDto};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::features::auth::session::{removal_cookie, session_id};
use crate::features::users::dtos::UserResponseDto;
use crate::shared::types::ApiResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use validator::Validate;

/// Login with username and password
///
/// On success a session is opened and its id is returned in the `sid` cookie.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (session, user) = service.login(dto).await?;
    Ok((
        jar.add(service.cookie_for(&session)),
        Json(ApiResponse::success(Some(user), None, None)),
    ))
}

/// Logout and clear the session cookie
///
/// Always succeeds; calling it without a session only clears the cookie.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    if let Some(session_id) = session_id(&jar) {
        service.logout(&session_id).await;
    }

    (
        jar.add(removal_cookie()),
        Json(ApiResponse::success(
            None,
            Some("Logged out".to_string()),
            None,
        )),
    )
}

/// Get the user of the current session
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<AuthenticatedUser>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_current_user(
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<AuthenticatedUser>>> {
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Register a new user (admin only)
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error or username taken"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "auth",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn register(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.register(dto).await?;
    tracing::info!("Admin {} registered user {}", admin.username, user.username);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(user), None, None)),
    ))
}

/// Delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AuthService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_user(&admin, id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
