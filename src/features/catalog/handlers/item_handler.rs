use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::catalog::dtos::{CreateItemDto, ItemResponseDto, UpdateItemDto};
use crate::features::catalog::services::CatalogService;
use crate::shared::types::{ApiResponse, Meta};

/// Query params for free-text search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Query params for category/subcategory scoped listings
#[derive(Debug, Deserialize)]
pub struct ScopeQuery {
    /// Also include items from descendant subcategories
    #[serde(default)]
    pub include_subcategories: bool,
}

/// Free-text catalog search
///
/// Case-insensitive substring match on name, description, and barcode,
/// capped at 50 results. Queries under 2 characters return the cleared
/// (empty) result without hitting the store.
#[utoipa::path(
    get,
    path = "/api/search",
    params(
        ("q" = String, Query, description = "Search text (min 2 characters)")
    ),
    responses(
        (status = 200, description = "Matching items", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 400, description = "Missing query parameter")
    ),
    tag = "catalog"
)]
pub async fn search_items(
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let q = query
        .q
        .ok_or_else(|| AppError::BadRequest("Missing query parameter 'q'".to_string()))?;

    let items = service.search(&q).await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Items scoped to a category
#[utoipa::path(
    get,
    path = "/api/category/{id}/products",
    params(
        ("id" = Uuid, Path, description = "Category id"),
        ("include_subcategories" = Option<bool>, Query, description = "Include descendant subcategories")
    ),
    responses(
        (status = 200, description = "Items in category", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "catalog"
)]
pub async fn items_by_category(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let items = service.by_category(id, query.include_subcategories).await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Items scoped to a subcategory
#[utoipa::path(
    get,
    path = "/api/subcategory/{id}/products",
    params(
        ("id" = Uuid, Path, description = "Subcategory id"),
        ("include_subcategories" = Option<bool>, Query, description = "Include descendant subcategories")
    ),
    responses(
        (status = 200, description = "Items in subcategory", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "catalog"
)]
pub async fn items_by_subcategory(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let items = service
        .by_subcategory(id, query.include_subcategories)
        .await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Single item fetch
#[utoipa::path(
    get,
    path = "/api/item/{id}",
    params(
        ("id" = Uuid, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = ApiResponse<ItemResponseDto>),
        (status = 404, description = "Item not found")
    ),
    tag = "catalog"
)]
pub async fn get_item(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Create an item
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateItemDto,
    responses(
        (status = 201, description = "Item created", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "catalog"
)]
pub async fn create_item(
    State(service): State<Arc<CatalogService>>,
    AppJson(dto): AppJson<CreateItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(item), None, None)),
    ))
}

/// Update an item
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item id")
    ),
    request_body = UpdateItemDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Item not found")
    ),
    tag = "catalog"
)]
pub async fn update_item(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateItemDto>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Item not found")
    ),
    tag = "catalog"
)]
pub async fn delete_item(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Item deleted".to_string()),
        None,
    )))
}
