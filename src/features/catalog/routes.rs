use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::catalog::handlers;
use crate::features::catalog::services::CatalogService;

/// Create routes for the catalog feature
pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/search", get(handlers::search_items))
        .route(
            "/api/category/{id}/products",
            get(handlers::items_by_category),
        )
        .route(
            "/api/subcategory/{id}/products",
            get(handlers::items_by_subcategory),
        )
        .route("/api/item/{id}", get(handlers::get_item))
        .route("/api/items", post(handlers::create_item))
        .route(
            "/api/items/{id}",
            put(handlers::update_item).delete(handlers::delete_item),
        )
        .with_state(service)
}
