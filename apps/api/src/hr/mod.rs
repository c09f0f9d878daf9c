//! HR contact directory: the job-context side of email generation.
//!
//! Upstream payloads arrive loosely shaped (scraped or hand-entered), so
//! every optional field is validated here at the boundary and stored as an
//! explicit `Option`. Batch creation validates per item and reports failures
//! by index instead of rejecting the whole batch.

pub mod handlers;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::hr::HrContact;

#[derive(Debug, Deserialize)]
pub struct NewHrContact {
    pub email: String,
    pub job_description: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FailedContact {
    pub index: usize,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CreateContactsSummary {
    pub created_count: usize,
    pub hr_ids: Vec<Uuid>,
    pub failed_count: usize,
    pub failed_contacts: Vec<FailedContact>,
}

/// Validates one incoming contact; returns the reason it is unusable, if any.
fn validate_contact(contact: &NewHrContact) -> Option<String> {
    if !contact.email.contains('@') {
        return Some("Invalid email address".to_string());
    }
    if contact.job_description.trim().is_empty() {
        return Some("Job description cannot be empty".to_string());
    }
    None
}

/// Normalizes an optional field: present-but-blank collapses to absent.
fn clean_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Creates HR contacts in one batch. Invalid entries are skipped and reported
/// by index; valid entries are inserted within a single transaction.
pub async fn create_hr_contacts(
    pool: &PgPool,
    contacts: &[NewHrContact],
) -> Result<CreateContactsSummary, AppError> {
    if contacts.is_empty() {
        return Err(AppError::Validation(
            "hr_contacts must be a non-empty list".to_string(),
        ));
    }

    let mut created = Vec::new();
    let mut failed = Vec::new();

    let mut tx = pool.begin().await?;

    for (index, contact) in contacts.iter().enumerate() {
        if let Some(error) = validate_contact(contact) {
            failed.push(FailedContact { index, error });
            continue;
        }

        let insert: Result<(Uuid,), sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO hr_contacts
                (email, phone, contact_name, contact_title, company, job_description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(contact.email.trim())
        .bind(clean_optional(&contact.phone))
        .bind(clean_optional(&contact.contact_name))
        .bind(clean_optional(&contact.contact_title))
        .bind(clean_optional(&contact.company))
        .bind(contact.job_description.trim())
        .fetch_one(&mut *tx)
        .await;

        match insert {
            Ok((id,)) => created.push(id),
            Err(e) => failed.push(FailedContact {
                index,
                error: e.to_string(),
            }),
        }
    }

    tx.commit().await?;

    Ok(CreateContactsSummary {
        created_count: created.len(),
        failed_count: failed.len(),
        hr_ids: created,
        failed_contacts: failed,
    })
}

pub async fn get_hr_contact_by_id(
    pool: &PgPool,
    hr_id: Uuid,
) -> Result<Option<HrContact>, sqlx::Error> {
    sqlx::query_as::<_, HrContact>("SELECT * FROM hr_contacts WHERE id = $1")
        .bind(hr_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_hr_contacts(pool: &PgPool, limit: i64) -> Result<Vec<HrContact>, sqlx::Error> {
    sqlx::query_as::<_, HrContact>(
        "SELECT * FROM hr_contacts ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(email: &str, jd: &str) -> NewHrContact {
        NewHrContact {
            email: email.to_string(),
            job_description: jd.to_string(),
            phone: None,
            contact_name: None,
            contact_title: None,
            company: None,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(validate_contact(&contact("hr@acme.com", "Backend engineer role")).is_none());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let error = validate_contact(&contact("not-an-email", "Role")).unwrap();
        assert!(error.contains("email"));
    }

    #[test]
    fn test_validate_rejects_blank_job_description() {
        let error = validate_contact(&contact("hr@acme.com", "   ")).unwrap();
        assert!(error.contains("Job description"));
    }

    #[test]
    fn test_clean_optional_collapses_blank_to_absent() {
        assert_eq!(clean_optional(&Some("   ".to_string())), None);
        assert_eq!(clean_optional(&None), None);
        assert_eq!(
            clean_optional(&Some("  Acme  ".to_string())),
            Some("Acme".to_string())
        );
    }
}
