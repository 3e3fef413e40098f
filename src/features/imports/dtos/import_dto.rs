use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One skipped row of an Excel import
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowErrorDto {
    /// Spreadsheet row number (header is row 1)
    pub row: u32,
    pub error: String,
}

/// Per-row result of an Excel import.
///
/// `errors` always carries one entry per skipped row; trimming the
/// list for display is left to the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResultDto {
    pub total: i64,
    pub success: i64,
    pub skipped: i64,
    pub errors: Vec<RowErrorDto>,
}

/// Upload request DTO for OpenAPI documentation.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ImportUploadDto {
    /// The .xlsx file to import
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}
