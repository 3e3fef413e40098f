use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a catalog item
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: Uuid,
    /// Business key; uniqueness is not enforced by the store
    pub barcode: String,
    pub name: String,
    pub description: Option<String>,
    /// None means "price on request"
    pub price: Option<Decimal>,
    /// Category display name, not a foreign key
    pub category: String,
    /// Subcategory display name, not a foreign key
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    pub specs: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
