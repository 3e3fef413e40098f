//! Category hierarchy feature.
//!
//! Categories form a tree via parent pointers. The tree is assembled
//! in memory from the flat list and served pre-nested; the admin
//! parent picker additionally gets a rendered row list with the
//! category being edited disabled.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | Category tree (`?flat=true` for flat list) |
//! | GET | `/api/categories/picker` | Rendered parent-picker rows |
//! | POST | `/api/categories` | Create category (admin) |
//! | PUT | `/api/categories/{id}` | Update category (admin) |
//! | DELETE | `/api/categories/{id}` | Delete category (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tree;

pub use services::CategoryService;
