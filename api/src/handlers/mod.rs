//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod analyze;
pub mod merge;

pub use analyze::upload_orders;
pub use merge::merge_files;
