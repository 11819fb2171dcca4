use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::models::UserRole;
use crate::shared::validation::USERNAME_REGEX;

/// Request DTO for user registration (admin only)
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        regex(
            path = *USERNAME_REGEX,
            message = "Username may only contain letters, digits and underscores and must not start with a digit"
        )
    )]
    pub username: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    /// Defaults to `user`
    #[serde(default)]
    pub role: UserRole,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::Password;
    use fake::Fake;

    #[test]
    fn test_register_role_defaults_to_user() {
        let dto: RegisterRequestDto =
            serde_json::from_str(r#"{"username":"ana_p","password":"longenough"}"#).unwrap();
        assert_eq!(dto.role, UserRole::User);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_register_rejects_bad_username() {
        let password: String = Password(8..20).fake();
        for username in ["ab", "9lives", "with space", "dash-name"] {
            let dto = RegisterRequestDto {
                username: username.to_string(),
                password: password.clone(),
                role: UserRole::User,
            };
            assert!(dto.validate().is_err(), "accepted {}", username);
        }
    }

    #[test]
    fn test_register_rejects_short_password() {
        let dto = RegisterRequestDto {
            username: "valid_name".to_string(),
            password: "short".to_string(),
            role: UserRole::Admin,
        };
        let err = dto.validate().unwrap_err();
        assert!(err.field_errors().contains_key("password"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let dto = LoginRequestDto {
            username: String::new(),
            password: String::new(),
        };
        let err = dto.validate().unwrap_err();
        assert!(err.field_errors().contains_key("username"));
        assert!(err.field_errors().contains_key("password"));
    }
}
