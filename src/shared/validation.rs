use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::constants::TAG_NAME_MAX_CHARS;

lazy_static! {
    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters
    /// and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

/// Rejects strings made only of whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Checks every tag name in a list is 1-100 characters once trimmed
pub fn tag_names(names: &[String]) -> Result<(), ValidationError> {
    let invalid = names.iter().find(|name| {
        let len = name.trim().chars().count();
        !(1..=TAG_NAME_MAX_CHARS).contains(&len)
    });

    if let Some(bad) = invalid {
        let mut err = ValidationError::new("tag_name");
        err.message = Some("Tag names must be 1-100 characters".into());
        err.add_param("value".into(), bad);
        return Err(err);
    }
    Ok(())
}

/// Trims and drops empty optional text so blank form fields are stored as NULL
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_regex_valid() {
        assert!(USERNAME_REGEX.is_match("john_doe"));
        assert!(USERNAME_REGEX.is_match("user123"));
        assert!(USERNAME_REGEX.is_match("_admin"));
        assert!(USERNAME_REGEX.is_match("JohnDoe"));
    }

    #[test]
    fn test_username_regex_invalid() {
        assert!(!USERNAME_REGEX.is_match("123user")); // starts with digit
        assert!(!USERNAME_REGEX.is_match("-user")); // starts with hyphen
        assert!(!USERNAME_REGEX.is_match("user-name")); // hyphen
        assert!(!USERNAME_REGEX.is_match("user name")); // space
        assert!(!USERNAME_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Cuenca").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_tag_names() {
        assert!(tag_names(&[]).is_ok());
        assert!(tag_names(&["prensa".to_string(), format!(" {} ", "x".repeat(100))]).is_ok());
        assert!(tag_names(&["prensa".to_string(), "x".repeat(101)]).is_err());
        assert!(tag_names(&["  ".to_string()]).is_err());
        // Length counts characters, not bytes
        assert!(tag_names(&["ñ".repeat(100)]).is_ok());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional(Some(" ACME ".to_string())),
            Some("ACME".to_string())
        );
    }
}
