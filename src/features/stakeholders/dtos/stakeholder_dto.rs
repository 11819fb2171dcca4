use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::stakeholders::models::{
    ContactInfo, LinkedinProfile, Stakeholder, StakeholderExportRow,
};
use crate::features::tags::dtos::TagRefDto;
use crate::shared::validation::{normalize_optional, not_blank};

/// Request DTO for creating or fully updating a stakeholder
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StakeholderRequestDto {
    #[validate(range(min = 1, message = "provincia_id is required"))]
    pub provincia_id: i32,

    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(nested)]
    pub contact: ContactInfo,

    pub objectives: Option<String>,
    pub interests: Option<String>,
    pub resources: Option<String>,
    pub communication_expectations: Option<String>,
    pub relations: Option<String>,
    pub risks: Option<String>,

    #[serde(default)]
    pub linkedin_profile: LinkedinProfile,

    /// When present, replaces the stakeholder's tag set
    pub tag_ids: Option<Vec<i32>>,
}

impl StakeholderRequestDto {
    /// Trim text and store blank optional fields as NULL
    pub fn normalized(self) -> Self {
        Self {
            provincia_id: self.provincia_id,
            name: self.name.trim().to_string(),
            contact: self.contact.normalized(),
            objectives: normalize_optional(self.objectives),
            interests: normalize_optional(self.interests),
            resources: normalize_optional(self.resources),
            communication_expectations: normalize_optional(self.communication_expectations),
            relations: normalize_optional(self.relations),
            risks: normalize_optional(self.risks),
            linkedin_profile: self.linkedin_profile.normalized(),
            tag_ids: self.tag_ids,
        }
    }
}

/// Request DTO replacing a stakeholder's tags
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignTagsDto {
    pub tag_ids: Vec<i32>,
}

/// Request DTO selecting stakeholders for a spreadsheet export
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExportSelectionDto {
    #[validate(length(min = 1, max = 1000, message = "Select between 1 and 1000 stakeholders"))]
    pub ids: Vec<i32>,
}

/// Query params for listing stakeholders
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StakeholderQueryParams {
    /// Comma-separated tag ids; matches stakeholders carrying any of them
    pub tags: Option<String>,
    /// Restrict to one provincia
    pub provincia_id: Option<i32>,
    /// Case-insensitive substring of the stakeholder name
    pub search: Option<String>,
}

impl StakeholderQueryParams {
    /// Parse the `tags` filter. Empty or absent means no tag filter.
    pub fn tag_ids(&self) -> Result<Vec<i32>, AppError> {
        let Some(raw) = self.tags.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid tag id '{}'", s)))
            })
            .collect()
    }

    /// Case-insensitive substring pattern for `LIKE ... ESCAPE '\'`.
    ///
    /// `%`, `_` and `\` in the search text match literally.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                let escaped = s
                    .to_lowercase()
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                format!("%{}%", escaped)
            })
    }
}

/// Response DTO for stakeholder
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StakeholderResponseDto {
    pub id: i32,
    pub provincia_id: i32,
    pub name: String,
    pub contact: ContactInfo,
    pub objectives: Option<String>,
    pub interests: Option<String>,
    pub resources: Option<String>,
    pub communication_expectations: Option<String>,
    pub relations: Option<String>,
    pub risks: Option<String>,
    pub linkedin_profile: LinkedinProfile,
    pub tags: Vec<TagRefDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StakeholderResponseDto {
    pub fn from_model(s: Stakeholder, tags: Vec<TagRefDto>) -> Self {
        Self {
            id: s.id,
            provincia_id: s.provincia_id,
            name: s.name,
            contact: s.contact.0,
            objectives: s.objectives,
            interests: s.interests,
            resources: s.resources,
            communication_expectations: s.communication_expectations,
            relations: s.relations,
            risks: s.risks,
            linkedin_profile: s.linkedin_profile.0,
            tags,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Flat contact row for spreadsheet export
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StakeholderExportRowDto {
    pub id: i32,
    pub name: String,
    pub provincia: String,
    pub linkedin_url: Option<String>,
    pub primary_organization: Option<String>,
    pub other_organizations: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    /// Tag names joined with ", "
    pub tags: String,
}

impl From<StakeholderExportRow> for StakeholderExportRowDto {
    fn from(r: StakeholderExportRow) -> Self {
        let contact = r.contact.0;
        Self {
            id: r.id,
            name: r.name,
            provincia: r.provincia,
            linkedin_url: contact.linkedin_url,
            primary_organization: contact.primary_organization,
            other_organizations: contact.other_organizations,
            contact_person: contact.contact_person,
            email: contact.email,
            website: contact.website,
            phone: contact.phone,
            tags: r.tags.unwrap_or_default(),
        }
    }
}
