use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::imports::dtos::{ImportResultDto, ImportUploadDto};
use crate::features::imports::services::ImportService;
use crate::shared::types::ApiResponse;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn xlsx_response(filename: &str, bytes: Vec<u8>) -> Result<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, XLSX_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build download response: {}", e)))
}

/// Download the import template
#[utoipa::path(
    get,
    path = "/api/products/export-template",
    responses(
        (status = 200, description = "XLSX template", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ),
    tag = "imports"
)]
pub async fn export_template(State(service): State<Arc<ImportService>>) -> Result<Response> {
    let bytes = service.template()?;
    xlsx_response("product-import-template.xlsx", bytes)
}

/// Download the whole catalog as XLSX
#[utoipa::path(
    get,
    path = "/api/products/export",
    responses(
        (status = 200, description = "XLSX export of all items", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ),
    tag = "imports"
)]
pub async fn export_products(State(service): State<Arc<ImportService>>) -> Result<Response> {
    let bytes = service.export().await?;
    xlsx_response("products.xlsx", bytes)
}

/// Import items from an uploaded XLSX file
///
/// Accepts multipart/form-data with a single `file` field. Rows are
/// imported independently; the response reports per-row results.
#[utoipa::path(
    post,
    path = "/api/products/import",
    request_body(
        content = ImportUploadDto,
        content_type = "multipart/form-data",
        description = "XLSX file upload",
    ),
    responses(
        (status = 200, description = "Import report", body = ApiResponse<ImportResultDto>),
        (status = 400, description = "Missing or unreadable file")
    ),
    tag = "imports"
)]
pub async fn import_products(
    State(service): State<Arc<ImportService>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ImportResultDto>>> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "file" || field.file_name().is_some() {
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;
            file_data = Some(data.to_vec());
        } else {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    let file_data = file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let report = service.import(file_data).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}
