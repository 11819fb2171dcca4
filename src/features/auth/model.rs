use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::{User, UserRole};

/// User resolved from the request's session, inserted into request extensions
/// by the session middleware
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
    #[serde(skip)]
    pub session_id: String,
}

impl AuthenticatedUser {
    pub fn from_user(user: User, session_id: String) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            session_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
