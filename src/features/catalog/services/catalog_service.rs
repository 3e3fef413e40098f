use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::catalog::browse;
use crate::features::catalog::dtos::{CreateItemDto, ItemResponseDto, UpdateItemDto};
use crate::features::catalog::models::Item;
use crate::features::categories::tree;
use crate::features::categories::CategoryService;
use crate::shared::constants::SEARCH_RESULT_LIMIT;

const ITEM_COLUMNS: &str = "id, barcode, name, description, price, category, subcategory, \
     images, specs, created_at, updated_at";

/// Service for catalog item operations.
///
/// Items carry category/subcategory display names; scoped queries go
/// through the category tree to resolve the name for an id and, when
/// requested, the names of every descendant.
pub struct CatalogService {
    pool: PgPool,
    category_service: Arc<CategoryService>,
}

impl CatalogService {
    pub fn new(pool: PgPool, category_service: Arc<CategoryService>) -> Self {
        Self {
            pool,
            category_service,
        }
    }

    /// Case-insensitive substring search over name, description, and
    /// barcode, capped at 50 results.
    ///
    /// Queries under two characters are never issued; the caller gets
    /// the cleared (empty) result instead.
    pub async fn search(&self, query: &str) -> Result<Vec<ItemResponseDto>> {
        if !browse::should_issue(query) {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", query.trim().to_lowercase());
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM items \
             WHERE LOWER(name) LIKE $1 OR LOWER(description) LIKE $1 OR LOWER(barcode) LIKE $1 \
             ORDER BY name \
             LIMIT $2"
        );
        let items = sqlx::query_as::<_, Item>(&sql)
            .bind(&pattern)
            .bind(SEARCH_RESULT_LIMIT)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search items: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    /// Items scoped to a category id.
    ///
    /// With `include_subcategories`, items whose subcategory name
    /// belongs to any descendant of the category are returned too, so
    /// the result is always a superset of the narrow query.
    pub async fn by_category(
        &self,
        category_id: Uuid,
        include_subcategories: bool,
    ) -> Result<Vec<ItemResponseDto>> {
        let nodes = self.category_service.list_tree().await?;
        let node = tree::find_by_id(&nodes, category_id)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", category_id)))?;

        let descendants = if include_subcategories {
            tree::descendant_names(node)
        } else {
            Vec::new()
        };

        self.fetch_scoped(&node.name, &descendants, true).await
    }

    /// Items scoped to a subcategory id, symmetric to `by_category`
    /// one level down.
    pub async fn by_subcategory(
        &self,
        subcategory_id: Uuid,
        include_subcategories: bool,
    ) -> Result<Vec<ItemResponseDto>> {
        let nodes = self.category_service.list_tree().await?;
        let node = tree::find_by_id(&nodes, subcategory_id).ok_or_else(|| {
            AppError::NotFound(format!("Subcategory '{}' not found", subcategory_id))
        })?;

        let descendants = if include_subcategories {
            tree::descendant_names(node)
        } else {
            Vec::new()
        };

        self.fetch_scoped(&node.name, &descendants, false).await
    }

    /// Fetch items matching a scope name plus optional descendant
    /// subcategory names. `match_category` selects which column the
    /// scope name applies to.
    async fn fetch_scoped(
        &self,
        name: &str,
        descendant_names: &[String],
        match_category: bool,
    ) -> Result<Vec<ItemResponseDto>> {
        let scope_column = if match_category {
            "category"
        } else {
            "subcategory"
        };

        let items = if descendant_names.is_empty() {
            let sql = format!(
                "SELECT {ITEM_COLUMNS} FROM items WHERE {scope_column} = $1 ORDER BY name"
            );
            sqlx::query_as::<_, Item>(&sql)
                .bind(name)
                .fetch_all(&self.pool)
                .await
        } else {
            let sql = format!(
                "SELECT {ITEM_COLUMNS} FROM items \
                 WHERE {scope_column} = $1 OR subcategory = ANY($2) \
                 ORDER BY name"
            );
            sqlx::query_as::<_, Item>(&sql)
                .bind(name)
                .bind(descendant_names)
                .fetch_all(&self.pool)
                .await
        }
        .map_err(|e| {
            tracing::error!("Failed to fetch items for {}: {:?}", scope_column, e);
            AppError::Database(e)
        })?;

        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    /// Get a single item by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<ItemResponseDto> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1");
        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get item by id: {:?}", e);
                AppError::Database(e)
            })?;

        item.map(|i| i.into())
            .ok_or_else(|| AppError::NotFound(format!("Item '{}' not found", id)))
    }

    /// Create a new item
    pub async fn create(&self, dto: CreateItemDto) -> Result<ItemResponseDto> {
        let sql = format!(
            "INSERT INTO items (barcode, name, description, price, category, subcategory, images, specs) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(&dto.barcode)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.price)
            .bind(&dto.category)
            .bind(&dto.subcategory)
            .bind(&dto.images)
            .bind(&dto.specs)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create item: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Item created: id={}, barcode={}", item.id, item.barcode);

        Ok(item.into())
    }

    /// Update an existing item (full replace)
    pub async fn update(&self, id: Uuid, dto: UpdateItemDto) -> Result<ItemResponseDto> {
        let sql = format!(
            "UPDATE items \
             SET barcode = $2, name = $3, description = $4, price = $5, category = $6, \
                 subcategory = $7, images = $8, specs = $9, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .bind(&dto.barcode)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.price)
            .bind(&dto.category)
            .bind(&dto.subcategory)
            .bind(&dto.images)
            .bind(&dto.specs)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update item: {:?}", e);
                AppError::Database(e)
            })?;

        item.map(|i| i.into())
            .ok_or_else(|| AppError::NotFound(format!("Item '{}' not found", id)))
    }

    /// Delete an item
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete item: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Item '{}' not found", id)));
        }

        tracing::info!("Item deleted: id={}", id);
        Ok(())
    }

    /// List every item, export order (category, then name)
    pub async fn list_all(&self) -> Result<Vec<ItemResponseDto>> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY category, name");
        let items = sqlx::query_as::<_, Item>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list items: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(items.into_iter().map(|i| i.into()).collect())
    }
}
