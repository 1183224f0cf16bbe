//! Merge handler
//!
//! Combines several JSON array uploads into one downloadable file.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::AppState;

/// POST /upload-json
///
/// Multipart upload, any number of JSON array files under the `jsonFiles`
/// field. Responds with the concatenated array as an attachment named
/// `merged.json`; the same bytes are persisted server-side.
pub async fn merge_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("jsonFiles") {
            let filename = field
                .file_name()
                .filter(|name| !name.is_empty())
                .unwrap_or("upload.json")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            files.push((filename, bytes.to_vec()));
        }
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files were uploaded.".to_string()));
    }

    let output = state.merge_service.merge(&files)?;

    let headers = [
        (header::CONTENT_TYPE, "application/json"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"merged.json\"",
        ),
    ];
    Ok((headers, output))
}
