//! Excel import/export for catalog items.
//!
//! The import is row-at-a-time: a malformed row is skipped and
//! reported, it never aborts the rest of the file.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/products/export-template` | XLSX import template download |
//! | GET | `/api/products/export` | XLSX download of the whole catalog |
//! | POST | `/api/products/import` | Multipart XLSX import, per-row report |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ImportService;
