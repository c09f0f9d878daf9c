//! Resume ingestion: normalize -> embed -> upsert, in that order.
//!
//! The upsert is the final step, so a normalization or embedding failure
//! leaves any previously stored resume untouched. There are no partial
//! writes to roll back.

pub mod handlers;

use pgvector::Vector;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract;
use crate::llm_client::LlmClient;
use crate::users::get_user_by_id;
use crate::vector_store;

/// Runs the full ingestion pipeline for one uploaded resume and returns the
/// number of characters extracted from the document.
pub async fn ingest_resume(
    pool: &PgPool,
    llm: &LlmClient,
    user_id: Uuid,
    file_bytes: &[u8],
    filename: &str,
) -> Result<usize, AppError> {
    get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::UnknownUser(user_id.to_string()))?;

    let resume_text = extract::normalize(file_bytes, filename)?;

    let embedding = llm
        .embed(&resume_text)
        .await
        .map_err(|e| AppError::EmbeddingProvider(e.to_string()))?;

    vector_store::upsert_resume(pool, user_id, &resume_text, Vector::from(embedding)).await?;

    let extracted_length = resume_text.chars().count();
    tracing::info!("Ingested resume for user {user_id}: {extracted_length} chars");
    Ok(extracted_length)
}
