/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "sid";

/// Format version written into provincia export documents
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// Longest tag name the `tags.name` column holds
pub const TAG_NAME_MAX_CHARS: usize = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can register and manage users
pub const ROLE_ADMIN: &str = "admin";

/// Regular user role - can manage provincias, stakeholders and tags
pub const ROLE_USER: &str = "user";
