//! Domain layer
//!
//! Entities describing the order export format consumed by the analytics
//! endpoints.

pub mod order;

pub use order::{Category, LineItem, LineItemConnection, LineItemEdge, Order, Product};
