use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "users",
    security(("session_cookie" = []))
)]
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let users = service.list().await?;
    Ok(Json(ApiResponse::list(users)))
}
