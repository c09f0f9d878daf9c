use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// The single persisted resume row for a user: normalized text plus its
/// embedding. At most one row exists per user at any time.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRecord {
    pub user_id: Uuid,
    pub resume_text: String,
    pub resume_embedding: Vector,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One similarity-search hit, ordered by ascending cosine distance.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeMatch {
    pub user_id: Uuid,
    pub resume_text: String,
}
