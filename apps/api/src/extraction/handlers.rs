//! Axum route handler for resume uploads.

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::extract_text;

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub characters: usize,
}

/// Oversized bodies keep their 413; every other multipart failure is a bad request.
fn upload_error(context: &str, error: MultipartError) -> AppError {
    let message = format!("{context}: {}", error.body_text());
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

/// POST /api/v1/resume/extract
///
/// Accepts a multipart upload with a `file` field and returns its text.
/// Extraction runs on the blocking pool.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let mut document: Option<(Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Invalid multipart body", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| upload_error("Failed to read upload", e))?;
        document = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = document.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{FILE_FIELD}' is required"))
    })?;

    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| {
            warn!("Extraction failed for {:?} ({size} bytes): {e}", file_name);
            AppError::from(e)
        })?;

    let characters = text.chars().count();
    info!(
        "Extracted {characters} characters from {:?} ({size} bytes)",
        file_name
    );

    Ok(Json(ExtractResponse { text, characters }))
}
