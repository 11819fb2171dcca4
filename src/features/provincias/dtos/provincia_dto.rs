use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::provincias::models::{Provincia, ProvinciaWithCount};
use crate::shared::validation::not_blank;

/// Request DTO for creating or renaming a provincia
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProvinciaRequestDto {
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
}

impl ProvinciaRequestDto {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// Response DTO for provincia
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProvinciaResponseDto {
    pub id: i32,
    pub name: String,
    /// Number of stakeholders owned by this provincia
    pub stakeholder_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProvinciaWithCount> for ProvinciaResponseDto {
    fn from(p: ProvinciaWithCount) -> Self {
        Self {
            id: p.id,
            name: p.name,
            stakeholder_count: p.stakeholder_count,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<Provincia> for ProvinciaResponseDto {
    /// Freshly created provincias own no stakeholders yet
    fn from(p: Provincia) -> Self {
        Self {
            id: p.id,
            name: p.name,
            stakeholder_count: 0,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        let valid = ProvinciaRequestDto {
            name: "Chimborazo".to_string(),
        };
        assert!(valid.validate().is_ok());

        for name in ["", "   ", &"p".repeat(201)] {
            let dto = ProvinciaRequestDto {
                name: name.to_string(),
            };
            assert!(dto.validate().is_err(), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn test_normalized_name_fits_limit() {
        let dto = ProvinciaRequestDto {
            name: format!(" {} ", "p".repeat(200)),
        }
        .normalized();

        assert_eq!(dto.name.len(), 200);
        assert!(dto.validate().is_ok());
    }
}
