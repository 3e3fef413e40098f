use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::imports::handlers;
use crate::features::imports::services::ImportService;

/// Create routes for the imports feature (admin)
pub fn routes(service: Arc<ImportService>) -> Router {
    Router::new()
        .route(
            "/api/products/export-template",
            get(handlers::export_template),
        )
        .route("/api/products/export", get(handlers::export_products))
        .route("/api/products/import", post(handlers::import_products))
        .with_state(service)
}
