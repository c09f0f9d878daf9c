//! Vector record store: one embedding+text row per user, plus similarity search.
//!
//! This module exclusively owns the `resumes` table. The per-user uniqueness
//! invariant is enforced by the `user_id` unique constraint together with an
//! atomic `ON CONFLICT` upsert; there is no application-level locking, and
//! concurrent same-user writes resolve as last-commit-wins.

use pgvector::Vector;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::resume::{ResumeMatch, ResumeRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

fn classify(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(db_err.to_string());
        }
    }
    StoreError::Unavailable(e)
}

/// Inserts or overwrites the resume row for `user_id` in a single statement.
///
/// Exactly one row per user survives the operation regardless of whether a
/// row existed before.
pub async fn upsert_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_text: &str,
    embedding: Vector,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO resumes (user_id, resume_text, resume_embedding)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE
        SET resume_text = EXCLUDED.resume_text,
            resume_embedding = EXCLUDED.resume_embedding,
            updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(resume_text)
    .bind(embedding)
    .execute(pool)
    .await
    .map_err(classify)?;

    debug!("Upserted resume for user {user_id}");
    Ok(())
}

/// Point lookup by owning user. `None` means no resume has been ingested;
/// an absent resume is never substituted with an empty record.
pub async fn get_resume_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<ResumeRecord>, StoreError> {
    sqlx::query_as::<_, ResumeRecord>(
        "SELECT user_id, resume_text, resume_embedding, created_at, updated_at \
         FROM resumes WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(classify)
}

/// Returns up to `limit` resumes ordered by ascending cosine distance from
/// `query` (pgvector's `<=>` operator; 0 = identical direction).
///
/// Ties fall back to Postgres row order. Returns an empty vec, never an
/// error, when the table is empty.
pub async fn search_nearest(
    pool: &PgPool,
    query: Vector,
    limit: i64,
) -> Result<Vec<ResumeMatch>, StoreError> {
    sqlx::query_as::<_, ResumeMatch>(
        "SELECT user_id, resume_text FROM resumes \
         ORDER BY resume_embedding <=> $1 LIMIT $2",
    )
    .bind(query)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(classify)
}
