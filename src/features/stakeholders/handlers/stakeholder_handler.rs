use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::stakeholders::dtos::{
    AssignTagsDto, ExportSelectionDto, StakeholderExportRowDto, StakeholderQueryParams,
    StakeholderRequestDto, StakeholderResponseDto,
};
use crate::features::stakeholders::services::StakeholderService;
use crate::shared::types::ApiResponse;

/// List stakeholders
///
/// Optional filters: `tags` (comma-separated ids, any match), `provincia_id`, `search`.
#[utoipa::path(
    get,
    path = "/api/stakeholders",
    params(StakeholderQueryParams),
    responses(
        (status = 200, description = "List of stakeholders", body = ApiResponse<Vec<StakeholderResponseDto>>),
        (status = 400, description = "Malformed tag filter"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stakeholders",
    security(("session_cookie" = []))
)]
pub async fn list_stakeholders(
    _user: AuthenticatedUser,
    State(service): State<Arc<StakeholderService>>,
    AppQuery(params): AppQuery<StakeholderQueryParams>,
) -> Result<Json<ApiResponse<Vec<StakeholderResponseDto>>>> {
    let stakeholders = service.list(&params).await?;
    Ok(Json(ApiResponse::list(stakeholders)))
}

/// Get a stakeholder by id
#[utoipa::path(
    get,
    path = "/api/stakeholders/{id}",
    params(
        ("id" = i32, Path, description = "Stakeholder ID")
    ),
    responses(
        (status = 200, description = "Stakeholder details", body = ApiResponse<StakeholderResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Stakeholder not found")
    ),
    tag = "stakeholders",
    security(("session_cookie" = []))
)]
pub async fn get_stakeholder(
    _user: AuthenticatedUser,
    State(service): State<Arc<StakeholderService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<StakeholderResponseDto>>> {
    let stakeholder = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(stakeholder), None, None)))
}

/// Create a stakeholder
#[utoipa::path(
    post,
    path = "/api/stakeholders",
    request_body = StakeholderRequestDto,
    responses(
        (status = 201, description = "Stakeholder created", body = ApiResponse<StakeholderResponseDto>),
        (status = 400, description = "Validation error, unknown provincia or tag"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stakeholders",
    security(("session_cookie" = []))
)]
pub async fn create_stakeholder(
    _user: AuthenticatedUser,
    State(service): State<Arc<StakeholderService>>,
    AppJson(dto): AppJson<StakeholderRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<StakeholderResponseDto>>)> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let stakeholder = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(stakeholder), None, None)),
    ))
}

/// Update a stakeholder
#[utoipa::path(
    put,
    path = "/api/stakeholders/{id}",
    params(
        ("id" = i32, Path, description = "Stakeholder ID")
    ),
    request_body = StakeholderRequestDto,
    responses(
        (status = 200, description = "Stakeholder updated", body = ApiResponse<StakeholderResponseDto>),
        (status = 400, description = "Validation error, unknown provincia or tag"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Stakeholder not found")
    ),
    tag = "stakeholders",
    security(("session_cookie" = []))
)]
pub async fn update_stakeholder(
    _user: AuthenticatedUser,
    State(service): State<Arc<StakeholderService>>,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<StakeholderRequestDto>,
) -> Result<Json<ApiResponse<StakeholderResponseDto>>> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let stakeholder = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(stakeholder), None, None)))
}

/// Delete a stakeholder
#[utoipa::path(
    delete,
    path = "/api/stakeholders/{id}",
    params(
        ("id" = i32, Path, description = "Stakeholder ID")
    ),
    responses(
        (status = 200, description = "Stakeholder deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Stakeholder not found")
    ),
    tag = "stakeholders",
    security(("session_cookie" = []))
)]
pub async fn delete_stakeholder(
    _user: AuthenticatedUser,
    State(service): State<Arc<StakeholderService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Replace the tags of a stakeholder
#[utoipa::path(
    post,
    path = "/api/stakeholders/{id}/tags",
    params(
        ("id" = i32, Path, description = "Stakeholder ID")
    ),
    request_body = AssignTagsDto,
    responses(
        (status = 200, description = "Tags replaced", body = ApiResponse<StakeholderResponseDto>),
        (status = 400, description = "Unknown tag id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Stakeholder not found")
    ),
    tag = "stakeholders",
    security(("session_cookie" = []))
)]
pub async fn assign_tags(
    _user: AuthenticatedUser,
    State(service): State<Arc<StakeholderService>>,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<AssignTagsDto>,
) -> Result<Json<ApiResponse<StakeholderResponseDto>>> {
    let stakeholder = service.set_tags(id, &dto.tag_ids).await?;
    Ok(Json(ApiResponse::success(Some(stakeholder), None, None)))
}

/// Export contact rows of selected stakeholders
///
/// Returns one flat row per stakeholder for spreadsheet generation.
#[utoipa::path(
    post,
    path = "/api/stakeholders/export",
    request_body = ExportSelectionDto,
    responses(
        (status = 200, description = "Contact rows", body = ApiResponse<Vec<StakeholderExportRowDto>>),
        (status = 400, description = "Empty selection"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stakeholders",
    security(("session_cookie" = []))
)]
pub async fn export_stakeholders(
    _user: AuthenticatedUser,
    State(service): State<Arc<StakeholderService>>,
    AppJson(dto): AppJson<ExportSelectionDto>,
) -> Result<Json<ApiResponse<Vec<StakeholderExportRowDto>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let rows = service.export_rows(&dto.ids).await?;
    Ok(Json(ApiResponse::list(rows)))
}
