use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::tags::models::{StakeholderTagRow, Tag, TagWithUsage};
use crate::shared::validation::not_blank;

/// Request DTO for creating or renaming a tag
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TagRequestDto {
    #[validate(
        length(min = 1, max = 100, message = "Tag name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
}

impl TagRequestDto {
    /// Trim the name so the length limit applies to what gets stored
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// Response DTO for tag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagResponseDto {
    pub id: i32,
    pub name: String,
    /// Number of stakeholders carrying this tag
    pub stakeholder_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<TagWithUsage> for TagResponseDto {
    fn from(t: TagWithUsage) -> Self {
        Self {
            id: t.id,
            name: t.name,
            stakeholder_count: t.stakeholder_count,
            created_at: t.created_at,
        }
    }
}

impl From<Tag> for TagResponseDto {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            name: t.name,
            stakeholder_count: 0,
            created_at: t.created_at,
        }
    }
}

/// Tag as embedded in stakeholder responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagRefDto {
    pub id: i32,
    pub name: String,
}

impl From<StakeholderTagRow> for TagRefDto {
    fn from(r: StakeholderTagRow) -> Self {
        Self {
            id: r.tag_id,
            name: r.name,
        }
    }
}
