use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::flags::handlers;
use crate::features::flags::store::FlagStore;

/// Create routes for the flags feature
pub fn routes(store: Arc<FlagStore>) -> Router {
    Router::new()
        .route(
            "/api/flags",
            get(handlers::list_flags).put(handlers::replace_flags),
        )
        .with_state(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(
            FlagStore::load(dir.path().join("flags.json"))
                .await
                .unwrap(),
        );
        let server = TestServer::new(routes(store)).unwrap();

        let put = server
            .put("/api/flags")
            .json(&json!({"excel_import": true}))
            .await;
        put.assert_status_ok();

        let get = server.get("/api/flags").await;
        get.assert_status_ok();
        let body: serde_json::Value = get.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["excel_import"], json!(true));
    }
}
