use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::catalog::models::Item;
use crate::shared::validation::BARCODE_REGEX;

/// Request DTO for creating an item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemDto {
    #[validate(regex(path = *BARCODE_REGEX, message = "Invalid barcode format"))]
    pub barcode: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,

    /// Absent means "price on request"
    pub price: Option<Decimal>,

    #[validate(length(min = 1, max = 255, message = "Category must be 1-255 characters"))]
    pub category: String,

    #[validate(length(max = 255, message = "Subcategory must not exceed 255 characters"))]
    pub subcategory: Option<String>,

    /// Image URLs, at most 10 per item
    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 images per item"))]
    pub images: Vec<String>,

    /// Free-text specification lines
    #[serde(default)]
    pub specs: Vec<String>,
}

/// Request DTO for updating an item (full replace)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemDto {
    #[validate(regex(path = *BARCODE_REGEX, message = "Invalid barcode format"))]
    pub barcode: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,

    pub price: Option<Decimal>,

    #[validate(length(min = 1, max = 255, message = "Category must be 1-255 characters"))]
    pub category: String,

    #[validate(length(max = 255, message = "Subcategory must not exceed 255 characters"))]
    pub subcategory: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 images per item"))]
    pub images: Vec<String>,

    #[serde(default)]
    pub specs: Vec<String>,
}

/// Response DTO for a catalog item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponseDto {
    pub id: Uuid,
    pub barcode: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// None means "price on request"
    pub price: Option<Decimal>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    pub specs: Vec<String>,
}

impl From<Item> for ItemResponseDto {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            barcode: i.barcode,
            name: i.name,
            description: i.description,
            price: i.price,
            category: i.category,
            subcategory: i.subcategory,
            images: i.images,
            specs: i.specs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    fn valid_dto() -> CreateItemDto {
        CreateItemDto {
            barcode: "8991002100".to_string(),
            name: "Kompor Tanam 3 Tungku".to_string(),
            description: Some(Sentence(3..8).fake()),
            price: None,
            category: "Dapur".to_string(),
            subcategory: Some("Kompor".to_string()),
            images: vec!["https://cdn.example.com/1.jpg".to_string()],
            specs: vec!["3 tungku".to_string()],
        }
    }

    #[test]
    fn test_valid_item_passes_validation() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_bad_barcode_fails_validation() {
        let mut dto = valid_dto();
        dto.barcode = "12--34".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_more_than_ten_images_fails_validation() {
        let mut dto = valid_dto();
        dto.images = (0..11)
            .map(|i| format!("https://cdn.example.com/{i}.jpg"))
            .collect();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_exactly_ten_images_passes_validation() {
        let mut dto = valid_dto();
        dto.images = (0..10)
            .map(|i| format!("https://cdn.example.com/{i}.jpg"))
            .collect();
        assert!(dto.validate().is_ok());
    }
}
