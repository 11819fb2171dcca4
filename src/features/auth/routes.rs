use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no session required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .with_state(service)
}

/// Protected auth routes (require a session)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/user", get(handlers::get_current_user))
        .route("/api/register", post(handlers::register))
        .route("/api/users/{id}", delete(handlers::delete_user))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::MemorySessionStore;
    use crate::features::users::UserService;
    use crate::shared::test_helpers::{
        lazy_pool, test_session_config, with_admin_auth, with_user_auth, TEST_ADMIN_ID,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fake::faker::internet::en::Username;
    use fake::Fake;
    use serde_json::json;

    fn service() -> Arc<AuthService> {
        let config = test_session_config();
        Arc::new(AuthService::new(
            Arc::new(UserService::new(lazy_pool())),
            Arc::new(MemorySessionStore::new(config.ttl)),
            &config,
        ))
    }

    #[tokio::test]
    async fn test_register_forbidden_for_non_admin() {
        let server = TestServer::new(with_user_auth(protected_routes(service()))).unwrap();
        let username: String = Username().fake();

        server
            .post("/api/register")
            .json(&json!({ "username": username, "password": "long-enough-pw" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_register_validates_payload() {
        let server = TestServer::new(with_admin_auth(protected_routes(service()))).unwrap();

        let response = server
            .post("/api/register")
            .json(&json!({ "username": "ok_name", "password": "short" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_self() {
        let server = TestServer::new(with_admin_auth(protected_routes(service()))).unwrap();

        server
            .delete(&format!("/api/users/{}", TEST_ADMIN_ID))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_current_user_is_returned_without_database() {
        let server = TestServer::new(with_user_auth(protected_routes(service()))).unwrap();
        let response = server.get("/api/user").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["username"], "analyst");
        assert_eq!(body["data"]["role"], "user");
        assert!(body["data"].get("session_id").is_none());
    }
}
