use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::flags::store::FlagStore;
use crate::shared::types::ApiResponse;

/// Current feature list
#[utoipa::path(
    get,
    path = "/api/flags",
    responses(
        (status = 200, description = "Feature list", body = ApiResponse<BTreeMap<String, bool>>),
    ),
    tag = "flags"
)]
pub async fn list_flags(
    State(store): State<Arc<FlagStore>>,
) -> Result<Json<ApiResponse<BTreeMap<String, bool>>>> {
    let flags = store.all().await;
    Ok(Json(ApiResponse::success(Some(flags), None, None)))
}

/// Replace the feature list (admin)
#[utoipa::path(
    put,
    path = "/api/flags",
    request_body = BTreeMap<String, bool>,
    responses(
        (status = 200, description = "Feature list replaced", body = ApiResponse<BTreeMap<String, bool>>),
    ),
    tag = "flags"
)]
pub async fn replace_flags(
    State(store): State<Arc<FlagStore>>,
    AppJson(flags): AppJson<BTreeMap<String, bool>>,
) -> Result<Json<ApiResponse<BTreeMap<String, bool>>>> {
    let flags = store.replace(flags).await?;
    Ok(Json(ApiResponse::success(Some(flags), None, None)))
}
