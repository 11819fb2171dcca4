use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::provincias::handlers;
use crate::features::provincias::services::ProvinciaService;

/// Create routes for the provincias feature
pub fn routes(service: Arc<ProvinciaService>) -> Router {
    Router::new()
        .route(
            "/api/provincias",
            get(handlers::list_provincias).post(handlers::create_provincia),
        )
        // Import must come before {id}
        .route("/api/provincias/import", post(handlers::import_provincia))
        .route(
            "/api/provincias/{id}",
            get(handlers::get_provincia)
                .put(handlers::update_provincia)
                .delete(handlers::delete_provincia),
        )
        .route(
            "/api/provincias/{id}/stakeholders",
            get(handlers::list_provincia_stakeholders),
        )
        .route(
            "/api/provincias/{id}/export",
            get(handlers::export_provincia),
        )
        .with_state(service)
}
