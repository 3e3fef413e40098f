//! Product image uploads.
//!
//! Images go straight to MinIO under the public prefix; the response
//! hands back the public URLs in upload order for the admin form to
//! attach to an item. No metadata is persisted here: the URLs on the
//! item are the only reference.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/upload-images` | Multipart image upload, returns URLs |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::UploadService;
