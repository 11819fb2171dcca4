#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use crate::features::users::models::UserRole;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub const TEST_ADMIN_ID: i32 = 1;

#[cfg(test)]
pub const TEST_USER_ID: i32 = 2;

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: TEST_ADMIN_ID,
        username: "admin".to_string(),
        role: UserRole::Admin,
        session_id: "test-admin-session".to_string(),
    }
}

#[cfg(test)]
pub fn create_regular_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: TEST_USER_ID,
        username: "analyst".to_string(),
        role: UserRole::User,
        session_id: "test-user-session".to_string(),
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
async fn inject_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_regular_user());
    next.run(request).await
}

/// Wrap a router so every request carries an admin identity
#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}

/// Wrap a router so every request carries a non-admin identity
#[cfg(test)]
pub fn with_user_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_user_middleware))
}

/// Pool that never connects unless a query runs.
///
/// Lets router tests exercise auth and validation rejections without a database.
#[cfg(test)]
pub fn lazy_pool() -> sqlx::PgPool {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_millis(100))
        .connect_lazy("postgres://localhost/stakeholder_registry_test")
        .unwrap()
}

#[cfg(test)]
pub fn test_session_config() -> crate::core::config::SessionConfig {
    crate::core::config::SessionConfig {
        ttl: std::time::Duration::from_secs(3600),
        cleanup_interval: std::time::Duration::from_secs(60),
        cookie_secure: false,
        bcrypt_cost: 4,
        admin_username: None,
        admin_password: None,
    }
}
