use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{self, dtos as auth_dtos};
use crate::features::provincias::{dtos as provincias_dtos, handlers as provincias_handlers};
use crate::features::stakeholders::{
    dtos as stakeholders_dtos, handlers as stakeholders_handlers, models as stakeholders_models,
};
use crate::features::tags::{dtos as tags_dtos, handlers as tags_handlers};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::shared::constants::SESSION_COOKIE;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_current_user,
        auth::handlers::register,
        auth::handlers::delete_user,
        // Users (admin)
        users_handlers::list_users,
        // Provincias
        provincias_handlers::list_provincias,
        provincias_handlers::get_provincia,
        provincias_handlers::create_provincia,
        provincias_handlers::update_provincia,
        provincias_handlers::delete_provincia,
        provincias_handlers::list_provincia_stakeholders,
        provincias_handlers::export_provincia,
        provincias_handlers::import_provincia,
        // Stakeholders
        stakeholders_handlers::list_stakeholders,
        stakeholders_handlers::get_stakeholder,
        stakeholders_handlers::create_stakeholder,
        stakeholders_handlers::update_stakeholder,
        stakeholders_handlers::delete_stakeholder,
        stakeholders_handlers::assign_tags,
        stakeholders_handlers::export_stakeholders,
        // Tags
        tags_handlers::list_tags,
        tags_handlers::create_tag,
        tags_handlers::update_tag,
        tags_handlers::delete_tag,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth_dtos::LoginRequestDto,
            auth_dtos::RegisterRequestDto,
            ApiResponse<auth::model::AuthenticatedUser>,
            // Users
            users_models::UserRole,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Provincias
            provincias_dtos::ProvinciaRequestDto,
            provincias_dtos::ProvinciaResponseDto,
            provincias_dtos::ProvinciaDocumentDto,
            provincias_dtos::ExportedProvinciaDto,
            provincias_dtos::ExportedStakeholderDto,
            ApiResponse<provincias_dtos::ProvinciaResponseDto>,
            ApiResponse<Vec<provincias_dtos::ProvinciaResponseDto>>,
            // Stakeholders
            stakeholders_models::ContactInfo,
            stakeholders_models::LinkedinProfile,
            stakeholders_dtos::StakeholderRequestDto,
            stakeholders_dtos::StakeholderResponseDto,
            stakeholders_dtos::AssignTagsDto,
            stakeholders_dtos::ExportSelectionDto,
            stakeholders_dtos::StakeholderExportRowDto,
            ApiResponse<stakeholders_dtos::StakeholderResponseDto>,
            ApiResponse<Vec<stakeholders_dtos::StakeholderResponseDto>>,
            ApiResponse<Vec<stakeholders_dtos::StakeholderExportRowDto>>,
            // Tags
            tags_dtos::TagRequestDto,
            tags_dtos::TagResponseDto,
            tags_dtos::TagRefDto,
            ApiResponse<tags_dtos::TagResponseDto>,
            ApiResponse<Vec<tags_dtos::TagResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Session login, logout and registration"),
        (name = "users", description = "User administration (admin only)"),
        (name = "provincias", description = "Provincias, their stakeholders and JSON export/import"),
        (name = "stakeholders", description = "Stakeholders, tag assignment and contact export"),
        (name = "tags", description = "Tags assignable to stakeholders"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Stakeholder Registry API",
        version = "0.1.0",
        description = "API documentation for the stakeholder registry",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
