use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    /// Parent category id; absent means root
    pub parent_id: Option<Uuid>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    /// Ascending display order among siblings
    #[serde(default)]
    pub sort_order: i32,
}

/// Request DTO for updating a category (full replace)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    pub parent_id: Option<Uuid>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[serde(default)]
    pub sort_order: i32,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            description: c.description,
            image_url: c.image_url,
            sort_order: c.sort_order,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories.
    ///
    /// The flat list is expected in display order (sort_order, name);
    /// sibling order is preserved as-is. A row whose parent chain never
    /// reaches a root is unreachable and silently dropped.
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        // Root categories (parent_id is None)
        let roots: Vec<&Category> = categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .collect();

        roots
            .into_iter()
            .map(|root| Self::build_node(root, &categories))
            .collect()
    }

    fn build_node(category: &Category, all_categories: &[Category]) -> CategoryTreeDto {
        let children: Vec<CategoryTreeDto> = all_categories
            .iter()
            .filter(|c| c.parent_id == Some(category.id))
            .map(|child| Self::build_node(child, all_categories))
            .collect();

        CategoryTreeDto {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            image_url: category.image_url.clone(),
            sort_order: category.sort_order,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cat(id: Uuid, parent_id: Option<Uuid>, name: &str, sort_order: i32) -> Category {
        Category {
            id,
            parent_id,
            name: name.to_string(),
            description: None,
            image_url: None,
            sort_order,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_nests_by_parent_pointer() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let flat = vec![
            cat(a, None, "Elektronik", 0),
            cat(b, Some(a), "Audio", 0),
            cat(c, Some(b), "Headphone", 0),
        ];

        let tree = CategoryTreeDto::build_tree(flat);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, a);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].id, b);
        assert_eq!(tree[0].children[0].children[0].id, c);
    }

    #[test]
    fn test_build_tree_preserves_sibling_order() {
        let root = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        // Flat list arrives already ordered by (sort_order, name)
        let flat = vec![
            cat(root, None, "Dapur", 0),
            cat(first, Some(root), "Panci", 1),
            cat(second, Some(root), "Wajan", 2),
        ];

        let tree = CategoryTreeDto::build_tree(flat);
        let children: Vec<Uuid> = tree[0].children.iter().map(|c| c.id).collect();
        assert_eq!(children, vec![first, second]);
    }

    #[test]
    fn test_build_tree_empty_input() {
        assert!(CategoryTreeDto::build_tree(Vec::new()).is_empty());
    }
}
