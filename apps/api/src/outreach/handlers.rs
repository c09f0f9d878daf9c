use axum::{extract::State, Json};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeMatch;
use crate::outreach::{generate_email, GeneratedEmail};
use crate::state::AppState;
use crate::vector_store;

#[derive(Debug, Deserialize)]
pub struct GenerateEmailRequest {
    pub phone_number: String,
    pub hr_contact_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct MatchResumeRequest {
    pub job_description: String,
    #[serde(default = "default_match_limit")]
    pub limit: i64,
}

fn default_match_limit() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct MatchResumeResponse {
    pub matches: Vec<ResumeMatch>,
}

/// POST /gen-email
pub async fn handle_generate_email(
    State(state): State<AppState>,
    Json(request): Json<GenerateEmailRequest>,
) -> Result<Json<GeneratedEmail>, AppError> {
    if request.phone_number.trim().is_empty() {
        return Err(AppError::Validation(
            "phone_number cannot be empty".to_string(),
        ));
    }

    let email = generate_email(
        &state.db,
        &state.llm,
        &request.phone_number,
        request.hr_contact_id,
    )
    .await?;

    Ok(Json(email))
}

/// POST /match-resume
///
/// Embeds a job description and returns the stored resumes nearest to it by
/// cosine distance. An empty match list means no resumes are stored yet.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    Json(request): Json<MatchResumeRequest>,
) -> Result<Json<MatchResumeResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let embedding = state
        .llm
        .embed(&request.job_description)
        .await
        .map_err(|e| AppError::EmbeddingProvider(e.to_string()))?;

    let matches = vector_store::search_nearest(
        &state.db,
        Vector::from(embedding),
        request.limit.clamp(1, 50),
    )
    .await?;

    Ok(Json(MatchResumeResponse { matches }))
}
