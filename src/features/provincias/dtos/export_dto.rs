//! Portable JSON document describing one provincia and its stakeholders.
//!
//! Produced by `GET /api/provincias/{id}/export` and accepted back by
//! `POST /api/provincias/import`. Tags travel by name, ids never leave the
//! database they belong to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::stakeholders::dtos::{StakeholderRequestDto, StakeholderResponseDto};
use crate::features::stakeholders::models::{ContactInfo, LinkedinProfile};
use crate::shared::constants::EXPORT_FORMAT_VERSION;
use crate::shared::validation::{normalize_optional, not_blank, tag_names};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProvinciaDocumentDto {
    pub version: u32,

    #[serde(default = "Utc::now")]
    pub exported_at: DateTime<Utc>,

    #[validate(nested)]
    pub provincia: ExportedProvinciaDto,

    #[serde(default)]
    #[validate(nested)]
    pub stakeholders: Vec<ExportedStakeholderDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExportedProvinciaDto {
    #[validate(
        length(min = 1, max = 200, message = "Provincia name must be 1-200 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExportedStakeholderDto {
    #[validate(
        length(min = 1, max = 200, message = "Stakeholder name must be 1-200 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(nested)]
    pub contact: ContactInfo,

    #[serde(default)]
    pub objectives: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default)]
    pub resources: Option<String>,
    #[serde(default)]
    pub communication_expectations: Option<String>,
    #[serde(default)]
    pub relations: Option<String>,
    #[serde(default)]
    pub risks: Option<String>,

    #[serde(default)]
    pub linkedin_profile: LinkedinProfile,

    /// Tag names
    #[serde(default)]
    #[validate(custom(function = "tag_names"))]
    pub tags: Vec<String>,
}

impl ProvinciaDocumentDto {
    pub fn new(provincia_name: String, stakeholders: Vec<StakeholderResponseDto>) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION,
            exported_at: Utc::now(),
            provincia: ExportedProvinciaDto {
                name: provincia_name,
            },
            stakeholders: stakeholders.into_iter().map(Into::into).collect(),
        }
    }

    /// Trim names so length limits apply to the stored text
    pub fn normalized(self) -> Self {
        Self {
            version: self.version,
            exported_at: self.exported_at,
            provincia: ExportedProvinciaDto {
                name: self.provincia.name.trim().to_string(),
            },
            stakeholders: self
                .stakeholders
                .into_iter()
                .map(ExportedStakeholderDto::normalized)
                .collect(),
        }
    }

    /// Reject documents written by an unknown format version
    pub fn ensure_supported_version(&self) -> Result<(), AppError> {
        if self.version == EXPORT_FORMAT_VERSION {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Unsupported export version {} (expected {})",
                self.version, EXPORT_FORMAT_VERSION
            )))
        }
    }
}

impl From<StakeholderResponseDto> for ExportedStakeholderDto {
    fn from(s: StakeholderResponseDto) -> Self {
        Self {
            name: s.name,
            contact: s.contact,
            objectives: s.objectives,
            interests: s.interests,
            resources: s.resources,
            communication_expectations: s.communication_expectations,
            relations: s.relations,
            risks: s.risks,
            linkedin_profile: s.linkedin_profile,
            tags: s.tags.into_iter().map(|t| t.name).collect(),
        }
    }
}

impl ExportedStakeholderDto {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            contact: self.contact.normalized(),
            objectives: normalize_optional(self.objectives),
            interests: normalize_optional(self.interests),
            resources: normalize_optional(self.resources),
            communication_expectations: normalize_optional(self.communication_expectations),
            relations: normalize_optional(self.relations),
            risks: normalize_optional(self.risks),
            linkedin_profile: self.linkedin_profile.normalized(),
            tags: self.tags.iter().map(|t| t.trim().to_string()).collect(),
        }
    }

    /// Stakeholder payload targeting `provincia_id`; tags are resolved separately by name
    pub fn to_request(&self, provincia_id: i32) -> StakeholderRequestDto {
        StakeholderRequestDto {
            provincia_id,
            name: self.name.clone(),
            contact: self.contact.clone(),
            objectives: self.objectives.clone(),
            interests: self.interests.clone(),
            resources: self.resources.clone(),
            communication_expectations: self.communication_expectations.clone(),
            relations: self.relations.clone(),
            risks: self.risks.clone(),
            linkedin_profile: self.linkedin_profile.clone(),
            tag_ids: None,
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tags::dtos::TagRefDto;

    fn stakeholder(name: &str, tags: &[&str]) -> StakeholderResponseDto {
        StakeholderResponseDto {
            id: 7,
            provincia_id: 2,
            name: name.to_string(),
            contact: ContactInfo {
                email: Some("info@example.org".to_string()),
                ..Default::default()
            },
            objectives: Some("Funding".to_string()),
            interests: None,
            resources: None,
            communication_expectations: None,
            relations: None,
            risks: None,
            linkedin_profile: LinkedinProfile::default(),
            tags: tags
                .iter()
                .enumerate()
                .map(|(i, n)| TagRefDto {
                    id: i as i32 + 1,
                    name: n.to_string(),
                })
                .collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_export_document_passes_import_validation() {
        let doc = ProvinciaDocumentDto::new(
            "Azuay".to_string(),
            vec![stakeholder("Cámara de Comercio", &["empresa", "prensa"])],
        );

        let json = serde_json::to_string(&doc).unwrap();
        let parsed: ProvinciaDocumentDto = serde_json::from_str(&json).unwrap();

        assert!(parsed.validate().is_ok());
        assert!(parsed.ensure_supported_version().is_ok());
        assert_eq!(parsed.provincia.name, "Azuay");
        assert_eq!(parsed.stakeholders[0].tags, vec!["empresa", "prensa"]);
    }

    #[test]
    fn test_export_document_omits_database_ids() {
        let doc = ProvinciaDocumentDto::new("Loja".to_string(), vec![stakeholder("Ana", &["x"])]);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["version"], 1);
        assert!(value["stakeholders"][0].get("id").is_none());
        assert!(value["stakeholders"][0].get("provincia_id").is_none());
        assert_eq!(value["stakeholders"][0]["tags"][0], "x");
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let doc: ProvinciaDocumentDto = serde_json::from_value(serde_json::json!({
            "version": 2,
            "provincia": { "name": "Loja" },
            "stakeholders": []
        }))
        .unwrap();

        assert!(matches!(
            doc.ensure_supported_version(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_invalid_stakeholder_fails_validation() {
        let doc: ProvinciaDocumentDto = serde_json::from_value(serde_json::json!({
            "version": 1,
            "provincia": { "name": "Loja" },
            "stakeholders": [{ "name": "  " }]
        }))
        .unwrap();

        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_overlong_tag_name_fails_validation() {
        let doc: ProvinciaDocumentDto = serde_json::from_value(serde_json::json!({
            "version": 1,
            "provincia": { "name": "Loja" },
            "stakeholders": [{ "name": "Ana", "tags": ["prensa", "x".repeat(101)] }]
        }))
        .unwrap();

        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("Tag names must be 1-100 characters"));
    }

    #[test]
    fn test_limits_apply_after_trimming() {
        let padded_name = format!("  {}  ", "a".repeat(200));
        let padded_tag = format!(" {} ", "t".repeat(100));
        let doc: ProvinciaDocumentDto = serde_json::from_value(serde_json::json!({
            "version": 1,
            "provincia": { "name": padded_name },
            "stakeholders": [{ "name": padded_name, "tags": [padded_tag, "  "] }]
        }))
        .unwrap();

        let doc = doc.normalized();
        assert_eq!(doc.provincia.name.len(), 200);
        assert_eq!(doc.stakeholders[0].tags[0].len(), 100);
        // Blank tag names are still refused once trimmed
        assert!(doc.validate().is_err());

        let mut doc = doc;
        doc.stakeholders[0].tags.pop();
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_to_request_targets_new_provincia() {
        let exported: ExportedStakeholderDto = stakeholder("  Ana  ", &[]).into();
        let request = exported.to_request(42);

        assert_eq!(request.provincia_id, 42);
        assert_eq!(request.name, "Ana");
        assert!(request.tag_ids.is_none());
    }
}
