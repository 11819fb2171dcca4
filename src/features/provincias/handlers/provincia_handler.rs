use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::provincias::dtos::{
    ProvinciaDocumentDto, ProvinciaRequestDto, ProvinciaResponseDto,
};
use crate::features::provincias::services::ProvinciaService;
use crate::features::stakeholders::dtos::StakeholderResponseDto;
use crate::shared::types::ApiResponse;

/// List all provincias
#[utoipa::path(
    get,
    path = "/api/provincias",
    responses(
        (status = 200, description = "List of provincias with stakeholder counts", body = ApiResponse<Vec<ProvinciaResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "provincias",
    security(("session_cookie" = []))
)]
pub async fn list_provincias(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProvinciaService>>,
) -> Result<Json<ApiResponse<Vec<ProvinciaResponseDto>>>> {
    let provincias = service.list().await?;
    Ok(Json(ApiResponse::list(provincias)))
}

/// Get a provincia by id
#[utoipa::path(
    get,
    path = "/api/provincias/{id}",
    params(
        ("id" = i32, Path, description = "Provincia ID")
    ),
    responses(
        (status = 200, description = "Provincia details", body = ApiResponse<ProvinciaResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Provincia not found")
    ),
    tag = "provincias",
    security(("session_cookie" = []))
)]
pub async fn get_provincia(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProvinciaService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ProvinciaResponseDto>>> {
    let provincia = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(provincia), None, None)))
}

/// Create a provincia
#[utoipa::path(
    post,
    path = "/api/provincias",
    request_body = ProvinciaRequestDto,
    responses(
        (status = 201, description = "Provincia created", body = ApiResponse<ProvinciaResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "provincias",
    security(("session_cookie" = []))
)]
pub async fn create_provincia(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProvinciaService>>,
    AppJson(dto): AppJson<ProvinciaRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProvinciaResponseDto>>)> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let provincia = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(provincia), None, None)),
    ))
}

/// Rename a provincia
#[utoipa::path(
    put,
    path = "/api/provincias/{id}",
    params(
        ("id" = i32, Path, description = "Provincia ID")
    ),
    request_body = ProvinciaRequestDto,
    responses(
        (status = 200, description = "Provincia updated", body = ApiResponse<ProvinciaResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Provincia not found")
    ),
    tag = "provincias",
    security(("session_cookie" = []))
)]
pub async fn update_provincia(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProvinciaService>>,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<ProvinciaRequestDto>,
) -> Result<Json<ApiResponse<ProvinciaResponseDto>>> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let provincia = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(provincia), None, None)))
}

/// Delete a provincia and all of its stakeholders
#[utoipa::path(
    delete,
    path = "/api/provincias/{id}",
    params(
        ("id" = i32, Path, description = "Provincia ID")
    ),
    responses(
        (status = 200, description = "Provincia deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Provincia not found")
    ),
    tag = "provincias",
    security(("session_cookie" = []))
)]
pub async fn delete_provincia(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProvinciaService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// List the stakeholders of a provincia
#[utoipa::path(
    get,
    path = "/api/provincias/{id}/stakeholders",
    params(
        ("id" = i32, Path, description = "Provincia ID")
    ),
    responses(
        (status = 200, description = "Stakeholders with tags", body = ApiResponse<Vec<StakeholderResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Provincia not found")
    ),
    tag = "provincias",
    security(("session_cookie" = []))
)]
pub async fn list_provincia_stakeholders(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProvinciaService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<StakeholderResponseDto>>>> {
    let stakeholders = service.stakeholders(id).await?;
    Ok(Json(ApiResponse::list(stakeholders)))
}

/// Download a provincia as a JSON document
///
/// The document can be fed back to `POST /api/provincias/import`.
#[utoipa::path(
    get,
    path = "/api/provincias/{id}/export",
    params(
        ("id" = i32, Path, description = "Provincia ID")
    ),
    responses(
        (status = 200, description = "Export document (attachment)", body = ProvinciaDocumentDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Provincia not found")
    ),
    tag = "provincias",
    security(("session_cookie" = []))
)]
pub async fn export_provincia(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProvinciaService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let doc = service.export(id).await?;
    let disposition = format!("attachment; filename=\"provincia-{}.json\"", id);

    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(doc)))
}

/// Import a provincia from an export document
///
/// Always creates a new provincia; tags are matched by name and created when missing.
#[utoipa::path(
    post,
    path = "/api/provincias/import",
    request_body = ProvinciaDocumentDto,
    responses(
        (status = 201, description = "Provincia imported", body = ApiResponse<ProvinciaResponseDto>),
        (status = 400, description = "Invalid document or unsupported version"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "provincias",
    security(("session_cookie" = []))
)]
pub async fn import_provincia(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProvinciaService>>,
    AppJson(doc): AppJson<ProvinciaDocumentDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProvinciaResponseDto>>)> {
    let doc = doc.normalized();
    doc.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let provincia = service.import(doc).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(provincia),
            Some("Provincia imported".to_string()),
            None,
        )),
    ))
}
