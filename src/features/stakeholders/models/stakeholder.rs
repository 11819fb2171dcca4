use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Structured contact details, stored as JSONB
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ContactInfo {
    #[validate(length(max = 500))]
    pub linkedin_url: Option<String>,
    #[validate(length(max = 300))]
    pub primary_organization: Option<String>,
    #[validate(length(max = 1000))]
    pub other_organizations: Option<String>,
    #[validate(length(max = 200))]
    pub contact_person: Option<String>,
    #[validate(length(max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub website: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

/// LinkedIn profile snapshot, stored as JSONB
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LinkedinProfile {
    pub about: Option<String>,
    pub headline: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub other: Option<String>,
}

/// Database model for stakeholder
#[derive(Debug, Clone, FromRow)]
pub struct Stakeholder {
    pub id: i32,
    pub provincia_id: i32,
    pub name: String,
    pub contact: Json<ContactInfo>,
    pub objectives: Option<String>,
    pub interests: Option<String>,
    pub resources: Option<String>,
    pub communication_expectations: Option<String>,
    pub relations: Option<String>,
    pub risks: Option<String>,
    pub linkedin_profile: Json<LinkedinProfile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stakeholder joined with its provincia name and aggregated tag names
#[derive(Debug, Clone, FromRow)]
pub struct StakeholderExportRow {
    pub id: i32,
    pub name: String,
    pub provincia: String,
    pub contact: Json<ContactInfo>,
    pub tags: Option<String>,
}

impl ContactInfo {
    /// Trim every field and drop the empty ones
    pub fn normalized(self) -> Self {
        use crate::shared::validation::normalize_optional as n;
        Self {
            linkedin_url: n(self.linkedin_url),
            primary_organization: n(self.primary_organization),
            other_organizations: n(self.other_organizations),
            contact_person: n(self.contact_person),
            email: n(self.email),
            website: n(self.website),
            phone: n(self.phone),
        }
    }
}

impl LinkedinProfile {
    /// Trim every field and drop the empty ones
    pub fn normalized(self) -> Self {
        use crate::shared::validation::normalize_optional as n;
        Self {
            about: n(self.about),
            headline: n(self.headline),
            experience: n(self.experience),
            education: n(self.education),
            other: n(self.other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_info_accepts_partial_json() {
        let contact: ContactInfo =
            serde_json::from_str(r#"{"email":"ana@example.org"}"#).unwrap();
        assert_eq!(contact.email.as_deref(), Some("ana@example.org"));
        assert!(contact.phone.is_none());

        let empty: LinkedinProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LinkedinProfile::default());
    }

    #[test]
    fn test_normalized_drops_blank_fields() {
        let contact = ContactInfo {
            email: Some("  ana@example.org ".to_string()),
            phone: Some("   ".to_string()),
            ..Default::default()
        }
        .normalized();

        assert_eq!(contact.email.as_deref(), Some("ana@example.org"));
        assert_eq!(contact.phone, None);
    }
}
