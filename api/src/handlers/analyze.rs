//! Upload handler
//!
//! Accepts an order export file and returns the four aggregations.

use axum::extract::Multipart;
use axum::Json;

use crate::app::{self, OrderAnalytics};
use crate::domain::Order;
use crate::error::AppError;

/// POST /upload
///
/// Multipart upload, one `.json` order export under the `file` field.
/// Responds with order sizes, price ranges, product categories, and
/// product types as ordered label-to-count maps.
pub async fn upload_orders(mut multipart: Multipart) -> Result<Json<OrderAnalytics>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            upload = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file part".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::BadRequest("No selected file".to_string()));
    }
    if !filename.ends_with(".json") {
        return Err(AppError::BadRequest("Invalid file type".to_string()));
    }

    let orders: Vec<Order> =
        serde_json::from_slice(&bytes).map_err(|e| AppError::Parse(e.to_string()))?;

    tracing::debug!(orders = orders.len(), %filename, "Analyzing uploaded export");

    Ok(Json(app::analyze(&orders)?))
}
