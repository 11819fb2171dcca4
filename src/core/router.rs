use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};

use crate::core::middleware;
use crate::features::auth::{routes as auth_routes, AuthService};
use crate::features::provincias::{routes as provincias_routes, ProvinciaService};
use crate::features::stakeholders::{routes as stakeholders_routes, StakeholderService};
use crate::features::tags::{routes as tags_routes, TagService};
use crate::features::users::{routes as users_routes, UserService};

/// Shared services handed to the feature routers
#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub provincias: Arc<ProvinciaService>,
    pub stakeholders: Arc<StakeholderService>,
    pub tags: Arc<TagService>,
}

/// Simple health check endpoint (no auth required)
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All API routes: session-protected features, public auth routes and `/health`
pub fn api_routes(services: &AppServices) -> Router {
    // Protected routes (require a live session)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&services.auth)))
        .merge(users_routes::routes(Arc::clone(&services.users)))
        .merge(provincias_routes::routes(Arc::clone(&services.provincias)))
        .merge(stakeholders_routes::routes(Arc::clone(&services.stakeholders)))
        .merge(tags_routes::routes(Arc::clone(&services.tags)))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&services.auth),
            middleware::session_middleware,
        ));

    // Public routes (no session required)
    let public_routes = auth_routes::public_routes(Arc::clone(&services.auth));

    let health_route = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
}
