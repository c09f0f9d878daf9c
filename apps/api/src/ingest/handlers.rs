use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::MAX_UPLOAD_BYTES;
use crate::ingest::ingest_resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub message: String,
    pub user_id: Uuid,
    pub filename: String,
    pub extracted_length: usize,
}

/// POST /upload-resume
///
/// Multipart form with a `user_id` text field and a `file` field
/// (PDF, DOCX, DOC, or TXT; max 10 MiB).
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some("user_id") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable user_id field: {e}")))?;
                let parsed = raw
                    .trim()
                    .parse::<Uuid>()
                    .map_err(|_| AppError::Validation("Invalid user_id format".to_string()))?;
                user_id = Some(parsed);
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(String::from)
                    .ok_or_else(|| AppError::Validation("File field has no filename".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file field: {e}")))?;
                file = Some((filename, bytes));
            }
            _ => {}
        }
    }

    let user_id = user_id
        .ok_or_else(|| AppError::Validation("Missing required field 'user_id'".to_string()))?;
    let (filename, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing required field 'file'".to_string()))?;

    // Size gate before any parsing work.
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File size ({:.2} MB) exceeds maximum allowed size (10 MB)",
            bytes.len() as f64 / 1024.0 / 1024.0
        )));
    }

    let extracted_length = ingest_resume(&state.db, &state.llm, user_id, &bytes, &filename).await?;

    Ok(Json(UploadResumeResponse {
        message: "success".to_string(),
        user_id,
        filename,
        extracted_length,
    }))
}
