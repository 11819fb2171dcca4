use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::{User, UserRole};

/// Public view of a user; the password hash is never exposed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_omits_password_hash() {
        let user = User {
            id: 7,
            username: "maria".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            role: UserRole::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponseDto::from(user)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["role"], "admin");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("secret"));
    }
}
