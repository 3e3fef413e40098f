//! Process-wide feature list.
//!
//! A small key-value map of feature switches persisted as a JSON
//! file: loaded once at startup, rewritten on every change. Single
//! process, single writer; the RwLock in the store is the only
//! coordination needed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/flags` | Current feature list |
//! | PUT | `/api/flags` | Replace and persist the feature list |

pub mod handlers;
pub mod routes;
pub mod store;

pub use store::FlagStore;
