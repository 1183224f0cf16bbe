//! Application layer
//!
//! The aggregation functions and the merge service invoked by the HTTP
//! handlers.

pub mod analytics_service;
pub mod merge_service;

pub use analytics_service::{
    analyze, is_not_shipping_protection, order_size_counts, price_range_counts,
    product_category_counts, product_type_counts, CountMap, OrderAnalytics,
};
pub use merge_service::MergeService;
