use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for tag
#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Tag joined with the number of stakeholders carrying it
#[derive(Debug, Clone, FromRow)]
pub struct TagWithUsage {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub stakeholder_count: i64,
}

/// Row of `stakeholder_tags` joined with the tag name
#[derive(Debug, Clone, FromRow)]
pub struct StakeholderTagRow {
    pub stakeholder_id: i32,
    pub tag_id: i32,
    pub name: String,
}
