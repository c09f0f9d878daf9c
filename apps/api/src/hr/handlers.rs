use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::hr::{
    create_hr_contacts, get_hr_contact_by_id, list_hr_contacts, CreateContactsSummary,
    NewHrContact,
};
use crate::models::hr::HrContact;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateContactsRequest {
    pub hr_contacts: Vec<NewHrContact>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// POST /hr-contacts
pub async fn handle_create_contacts(
    State(state): State<AppState>,
    Json(request): Json<CreateContactsRequest>,
) -> Result<Json<CreateContactsSummary>, AppError> {
    let summary = create_hr_contacts(&state.db, &request.hr_contacts).await?;
    tracing::info!(
        "Created {} HR contacts ({} failed)",
        summary.created_count,
        summary.failed_count
    );
    Ok(Json(summary))
}

/// GET /hr-contacts/:id
pub async fn handle_get_contact(
    State(state): State<AppState>,
    Path(hr_id): Path<Uuid>,
) -> Result<Json<HrContact>, AppError> {
    let contact = get_hr_contact_by_id(&state.db, hr_id)
        .await?
        .ok_or_else(|| AppError::JobContextNotFound(hr_id.to_string()))?;
    Ok(Json(contact))
}

/// GET /hr-contacts
pub async fn handle_list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<HrContact>>, AppError> {
    let contacts = list_hr_contacts(&state.db, query.limit.clamp(1, 500)).await?;
    Ok(Json(contacts))
}
