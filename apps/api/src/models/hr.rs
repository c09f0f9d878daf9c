use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// HR contact row. Sender metadata fields come from loosely-shaped upstream
/// payloads and are genuinely optional; `None` means the field was absent or
/// null at ingestion, and consumers substitute an explicit sentinel instead
/// of interpolating blanks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HrContact {
    pub id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub company: Option<String>,
    pub job_description: String,
    pub created_at: DateTime<Utc>,
}
