use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::features::categories::tree::{self, TreeRow};

const CATEGORY_COLUMNS: &str =
    "id, parent_id, name, description, image_url, sort_order, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self) -> Result<Vec<Category>> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, Category>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    /// List all categories (flat, display order)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.fetch_all().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List all categories as a pre-built tree
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.fetch_all().await?;
        Ok(CategoryTreeDto::build_tree(categories))
    }

    /// Render the parent-picker rows for the admin form.
    ///
    /// `exclude` is the category being edited; it renders disabled so
    /// it cannot be chosen as its own parent.
    pub async fn picker(
        &self,
        exclude: Option<Uuid>,
        expanded: &HashSet<Uuid>,
    ) -> Result<Vec<TreeRow>> {
        let nodes = self.list_tree().await?;
        Ok(tree::render(&nodes, exclude, expanded))
    }

    /// Get category by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                AppError::Database(e)
            })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    /// Create a new category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        if let Some(parent_id) = dto.parent_id {
            self.ensure_valid_parent(None, parent_id).await?;
        }

        let sql = format!(
            "INSERT INTO categories (name, description, parent_id, image_url, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.parent_id)
            .bind(&dto.image_url)
            .bind(dto.sort_order)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(category.into())
    }

    /// Update an existing category (full replace)
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        if let Some(parent_id) = dto.parent_id {
            if parent_id == id {
                return Err(AppError::Validation(
                    "A category cannot be its own parent".to_string(),
                ));
            }
            self.ensure_valid_parent(Some(id), parent_id).await?;
        }

        let sql = format!(
            "UPDATE categories \
             SET name = $2, description = $3, parent_id = $4, image_url = $5, \
                 sort_order = $6, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.parent_id)
            .bind(&dto.image_url)
            .bind(dto.sort_order)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category: {:?}", e);
                AppError::Database(e)
            })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    /// Delete a category.
    ///
    /// Children are promoted to roots (FK ON DELETE SET NULL); items
    /// referencing the category by name keep the dangling name.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category '{}' not found", id)));
        }

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }

    /// Reject a parent assignment that does not resolve, or that would
    /// close an ancestor-chain cycle. Only the direct self-reference is
    /// caught at the form level; multi-hop cycles are caught here.
    async fn ensure_valid_parent(&self, editing: Option<Uuid>, parent_id: Uuid) -> Result<()> {
        let rows: Vec<(Uuid, Option<Uuid>)> =
            sqlx::query_as("SELECT id, parent_id FROM categories")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to load category parents: {:?}", e);
                    AppError::Database(e)
                })?;

        let parents: HashMap<Uuid, Option<Uuid>> = rows.into_iter().collect();

        if !parents.contains_key(&parent_id) {
            return Err(AppError::Validation(format!(
                "Parent category '{}' not found",
                parent_id
            )));
        }

        if let Some(editing) = editing {
            if tree::parent_chain_contains(&parents, Some(parent_id), editing) {
                return Err(AppError::Validation(
                    "A category cannot be moved under one of its own descendants".to_string(),
                ));
            }
        }

        Ok(())
    }
}
