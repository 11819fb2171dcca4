use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::tags::handlers;
use crate::features::tags::services::TagService;

/// Create routes for the tags feature
pub fn routes(service: Arc<TagService>) -> Router {
    Router::new()
        .route(
            "/api/tags",
            get(handlers::list_tags).post(handlers::create_tag),
        )
        .route(
            "/api/tags/{id}",
            put(handlers::update_tag).delete(handlers::delete_tag),
        )
        .with_state(service)
}
