use std::collections::HashSet;
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
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::features::categories::tree::TreeRow;
use crate::shared::types::ApiResponse;

/// Query params for listing categories
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    /// If true, return the flat list. Default: false (pre-built tree)
    #[serde(default)]
    pub flat: bool,
}

/// Query params for the parent picker
#[derive(Debug, Deserialize)]
pub struct PickerQuery {
    /// Category being edited; rendered disabled
    pub exclude: Option<Uuid>,
    /// Comma-separated ids of expanded nodes
    pub expanded: Option<String>,
}

impl PickerQuery {
    fn expanded_set(&self) -> HashSet<Uuid> {
        self.expanded
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }
}

/// List all categories
///
/// Returns the pre-built tree by default, or the flat list with `flat=true`.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("flat" = Option<bool>, Query, description = "Return flat list if true")
    ),
    responses(
        (status = 200, description = "Categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    if query.flat {
        let categories = service.list().await?;
        let value = serde_json::to_value(categories).unwrap();
        Ok(Json(ApiResponse::success(Some(value), None, None)))
    } else {
        let tree = service.list_tree().await?;
        let value = serde_json::to_value(tree).unwrap();
        Ok(Json(ApiResponse::success(Some(value), None, None)))
    }
}

/// Render the admin parent picker
///
/// Rows are pre-rendered with depth, expand state, and the edited
/// category disabled; expansion state itself stays client-side.
#[utoipa::path(
    get,
    path = "/api/categories/picker",
    params(
        ("exclude" = Option<Uuid>, Query, description = "Category being edited"),
        ("expanded" = Option<String>, Query, description = "Comma-separated expanded node ids")
    ),
    responses(
        (status = 200, description = "Picker rows", body = ApiResponse<Vec<TreeRow>>),
    ),
    tag = "categories"
)]
pub async fn render_picker(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<PickerQuery>,
) -> Result<Json<ApiResponse<Vec<TreeRow>>>> {
    let rows = service.picker(query.exclude, &query.expanded_set()).await?;
    Ok(Json(ApiResponse::success(Some(rows), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error (including cyclic parent)"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category
///
/// Items referencing the category by name are not touched.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted".to_string()),
        None,
    )))
}
