use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the users feature (admin only)
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users", get(handlers::list_users))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, with_user_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn service() -> Arc<UserService> {
        Arc::new(UserService::new(lazy_pool()))
    }

    #[tokio::test]
    async fn test_list_users_requires_authentication() {
        let server = TestServer::new(routes(service())).unwrap();
        server
            .get("/api/users")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_users_forbidden_for_non_admin() {
        let server = TestServer::new(with_user_auth(routes(service()))).unwrap();
        let response = server.get("/api/users").await;

        response.assert_status(StatusCode::FORBIDDEN);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Admin access required");
    }
}
