use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for provincia
#[derive(Debug, Clone, FromRow)]
pub struct Provincia {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Provincia joined with the number of stakeholders it owns
#[derive(Debug, Clone, FromRow)]
pub struct ProvinciaWithCount {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stakeholder_count: i64,
}
