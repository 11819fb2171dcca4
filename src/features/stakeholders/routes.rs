use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::stakeholders::handlers;
use crate::features::stakeholders::services::StakeholderService;

/// Create routes for the stakeholders feature
pub fn routes(service: Arc<StakeholderService>) -> Router {
    Router::new()
        .route(
            "/api/stakeholders",
            get(handlers::list_stakeholders).post(handlers::create_stakeholder),
        )
        // Static segment takes precedence over {id}
        .route(
            "/api/stakeholders/export",
            post(handlers::export_stakeholders),
        )
        .route(
            "/api/stakeholders/{id}",
            get(handlers::get_stakeholder)
                .put(handlers::update_stakeholder)
                .delete(handlers::delete_stakeholder),
        )
        .route("/api/stakeholders/{id}/tags", post(handlers::assign_tags))
        .with_state(service)
}
