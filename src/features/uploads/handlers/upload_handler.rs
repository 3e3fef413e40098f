use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::AppError;
use crate::features::uploads::dtos::{
    is_image_type_allowed, UploadImagesDto, UploadedImagesResponseDto, ALLOWED_IMAGE_TYPES,
    MAX_IMAGE_SIZE,
};
use crate::features::uploads::services::{ImageUpload, UploadService};
use crate::shared::constants::MAX_UPLOAD_FILES;
use crate::shared::types::ApiResponse;

/// Upload product images
///
/// Accepts multipart/form-data with one or more image parts (any field
/// name with a filename counts). Returns the public URLs in upload
/// order.
#[utoipa::path(
    post,
    path = "/api/upload-images",
    request_body(
        content = UploadImagesDto,
        content_type = "multipart/form-data",
        description = "One or more image files",
    ),
    responses(
        (status = 201, description = "Images uploaded", body = ApiResponse<UploadedImagesResponseDto>),
        (status = 400, description = "Invalid file type, size, or count")
    ),
    tag = "uploads"
)]
pub async fn upload_images(
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedImagesResponseDto>>), AppError> {
    let mut images: Vec<ImageUpload> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let Some(file_name) = field.file_name().map(|s| s.to_string()) else {
            debug!("Ignoring non-file field: {}", field.name().unwrap_or(""));
            continue;
        };

        if images.len() >= MAX_UPLOAD_FILES {
            return Err(AppError::BadRequest(format!(
                "At most {} images per upload",
                MAX_UPLOAD_FILES
            )));
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        if !is_image_type_allowed(&content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                MAX_IMAGE_SIZE,
                MAX_IMAGE_SIZE / 1024 / 1024
            )));
        }

        images.push(ImageUpload {
            original_filename: file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    if images.is_empty() {
        return Err(AppError::BadRequest("At least one image is required".to_string()));
    }

    let urls = service.upload_images(images).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(UploadedImagesResponseDto { urls }),
            None,
            None,
        )),
    ))
}
