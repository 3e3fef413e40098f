use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::uploads::handlers;
use crate::features::uploads::services::UploadService;

/// Create routes for the uploads feature (admin)
pub fn routes(service: Arc<UploadService>) -> Router {
    Router::new()
        .route("/api/upload-images", post(handlers::upload_images))
        .with_state(service)
}
