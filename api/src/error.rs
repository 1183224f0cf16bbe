//! Unified error types for the OrderLens API
//!
//! This module defines error types for each layer:
//! - `AnalyticsError`: aggregation errors over parsed order data
//! - `MergeError`: JSON merge and file output errors
//! - `AppError`: application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors produced while aggregating a parsed order list
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("order total price is not a decimal number: {0:?}")]
    InvalidPrice(String),

    #[error("file contains no orders")]
    NoOrders,
}

/// Errors produced by the JSON merge operation
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("{filename} is not valid JSON: {source}")]
    InvalidJson {
        filename: String,
        source: serde_json::Error,
    },

    #[error("each JSON file must contain an array, {filename} does not")]
    NotAnArray { filename: String },

    #[error("failed to write merged file: {0}")]
    Io(#[from] std::io::Error),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Analytics(#[from] AnalyticsError),

    #[error("{0}")]
    Merge(#[from] MergeError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Analytics(e) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(e.to_string()),
            ),
            AppError::Merge(MergeError::Io(e)) => {
                tracing::error!("Merge output error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Merge(e) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(e.to_string()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Parse(msg) => (StatusCode::BAD_REQUEST, "Parse error", Some(msg.clone())),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
