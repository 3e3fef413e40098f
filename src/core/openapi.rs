use utoipa::{Modify, OpenApi};

use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, tree,
};
use crate::features::flags::handlers as flags_handlers;
use crate::features::imports::{dtos as imports_dtos, handlers as imports_handlers};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::render_picker,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Catalog
        catalog_handlers::search_items,
        catalog_handlers::items_by_category,
        catalog_handlers::items_by_subcategory,
        catalog_handlers::get_item,
        catalog_handlers::create_item,
        catalog_handlers::update_item,
        catalog_handlers::delete_item,
        // Imports
        imports_handlers::export_template,
        imports_handlers::export_products,
        imports_handlers::import_products,
        // Uploads
        uploads_handlers::upload_images,
        // Flags
        flags_handlers::list_flags,
        flags_handlers::replace_flags,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            tree::TreeRow,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryTreeDto>>,
            ApiResponse<Vec<tree::TreeRow>>,
            // Catalog
            catalog_dtos::CreateItemDto,
            catalog_dtos::UpdateItemDto,
            catalog_dtos::ItemResponseDto,
            ApiResponse<Vec<catalog_dtos::ItemResponseDto>>,
            ApiResponse<catalog_dtos::ItemResponseDto>,
            // Imports
            imports_dtos::ImportUploadDto,
            imports_dtos::RowErrorDto,
            imports_dtos::ImportResultDto,
            ApiResponse<imports_dtos::ImportResultDto>,
            // Uploads
            uploads_dtos::UploadImagesDto,
            uploads_dtos::UploadedImagesResponseDto,
            ApiResponse<uploads_dtos::UploadedImagesResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Category hierarchy (browse + admin CRUD)"),
        (name = "catalog", description = "Catalog items: scoped listings, search, admin CRUD"),
        (name = "imports", description = "Excel import/export (admin)"),
        (name = "uploads", description = "Product image uploads (admin)"),
        (name = "flags", description = "Process-wide feature list"),
    ),
    info(
        title = "Etalase API",
        version = "0.1.0",
        description = "API documentation for Etalase",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
