use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::tags::dtos::{TagRequestDto, TagResponseDto};
use crate::features::tags::services::TagService;
use crate::shared::types::ApiResponse;

/// List all tags
#[utoipa::path(
    get,
    path = "/api/tags",
    responses(
        (status = 200, description = "List of tags", body = ApiResponse<Vec<TagResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tags",
    security(("session_cookie" = []))
)]
pub async fn list_tags(
    _user: AuthenticatedUser,
    State(service): State<Arc<TagService>>,
) -> Result<Json<ApiResponse<Vec<TagResponseDto>>>> {
    let tags = service.list().await?;
    Ok(Json(ApiResponse::list(tags)))
}

/// Create a tag
#[utoipa::path(
    post,
    path = "/api/tags",
    request_body = TagRequestDto,
    responses(
        (status = 201, description = "Tag created", body = ApiResponse<TagResponseDto>),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tags",
    security(("session_cookie" = []))
)]
pub async fn create_tag(
    _user: AuthenticatedUser,
    State(service): State<Arc<TagService>>,
    AppJson(dto): AppJson<TagRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<TagResponseDto>>)> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let tag = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(tag), None, None)),
    ))
}

/// Rename a tag
#[utoipa::path(
    put,
    path = "/api/tags/{id}",
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    request_body = TagRequestDto,
    responses(
        (status = 200, description = "Tag updated", body = ApiResponse<TagResponseDto>),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tag not found")
    ),
    tag = "tags",
    security(("session_cookie" = []))
)]
pub async fn update_tag(
    _user: AuthenticatedUser,
    State(service): State<Arc<TagService>>,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<TagRequestDto>,
) -> Result<Json<ApiResponse<TagResponseDto>>> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let tag = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(tag), None, None)))
}

/// Delete a tag
#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tag not found")
    ),
    tag = "tags",
    security(("session_cookie" = []))
)]
pub async fn delete_tag(
    _user: AuthenticatedUser,
    State(service): State<Arc<TagService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
