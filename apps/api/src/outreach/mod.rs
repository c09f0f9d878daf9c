//! Outreach email generation: the orchestrator that ties resume retrieval,
//! job context, and the completion provider together.
//!
//! The flow is a straight line with no branching loops: resolve job context,
//! resolve resume, compose the prompt context, make one completion call,
//! validate the payload. Each lookup fails with its own error so callers can
//! tell the user exactly what is missing. No retry is attempted internally.

pub mod handlers;
pub mod prompts;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::hr::HrContact;
use crate::outreach::prompts::EMAIL_PROMPT_TEMPLATE;
use crate::users::get_user_by_phone;
use crate::vector_store;
use crate::{hr, users};

/// Sentinel substituted for absent sender metadata so the prompt is always
/// fully populated; the model is told how to handle an unknown contact.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Everything the email prompt needs, assembled for one generation call and
/// discarded afterwards. Never persisted, never shared across requests.
#[derive(Debug, Clone)]
pub struct OutreachContext {
    pub resume_text: String,
    pub job_description: String,
    pub contact_name: String,
    pub contact_title: String,
    pub company: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub body: String,
}

/// Generates a personalized outreach email for the user identified by
/// `phone_number`, targeting the job held by HR contact `hr_contact_id`.
pub async fn generate_email(
    pool: &PgPool,
    llm: &LlmClient,
    phone_number: &str,
    hr_contact_id: Uuid,
) -> Result<GeneratedEmail, AppError> {
    // Independent reads, each with its own not-found error.
    let contact = hr::get_hr_contact_by_id(pool, hr_contact_id)
        .await?
        .ok_or_else(|| AppError::JobContextNotFound(hr_contact_id.to_string()))?;

    let user = get_user_by_phone(pool, phone_number)
        .await?
        .ok_or_else(|| AppError::UnknownUser(phone_number.to_string()))?;

    let resume = vector_store::get_resume_by_user(pool, user.id)
        .await?
        .filter(|r| !r.resume_text.trim().is_empty())
        .ok_or_else(|| AppError::ResumeNotFound(users::normalize_phone_number(phone_number)))?;

    let context = compose_context(resume.resume_text, &contact);
    let prompt = build_prompt(&context);

    let payload = llm.complete_json(&prompt).await.map_err(|e| match e {
        LlmError::Parse(_) | LlmError::EmptyContent => {
            AppError::MalformedGenerationOutput(e.to_string())
        }
        other => AppError::Internal(anyhow!("completion call failed: {other}")),
    })?;

    let email = validate_email_payload(&payload).map_err(AppError::MalformedGenerationOutput)?;

    tracing::info!(
        "Generated outreach email for user {} -> contact {hr_contact_id}",
        user.id
    );
    Ok(email)
}

/// Builds the ephemeral context, substituting the sentinel for any sender
/// metadata the HR record does not carry. Nothing downstream ever sees a
/// blank or null field.
fn compose_context(resume_text: String, contact: &HrContact) -> OutreachContext {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SENDER)
            .to_string()
    };

    OutreachContext {
        resume_text,
        job_description: contact.job_description.clone(),
        contact_name: field(&contact.contact_name),
        contact_title: field(&contact.contact_title),
        company: field(&contact.company),
    }
}

fn build_prompt(context: &OutreachContext) -> String {
    EMAIL_PROMPT_TEMPLATE
        .replace("{contact_name}", &context.contact_name)
        .replace("{contact_title}", &context.contact_title)
        .replace("{company}", &context.company)
        .replace("{resume_text}", &context.resume_text)
        .replace("{job_description}", &context.job_description)
}

/// Enforces the generation contract: a JSON object with non-empty `subject`
/// and `body` strings. Anything else is a provider-contract violation.
fn validate_email_payload(payload: &serde_json::Value) -> Result<GeneratedEmail, String> {
    let read = |key: &str| -> Result<String, String> {
        let value = payload
            .get(key)
            .ok_or_else(|| format!("response is missing the '{key}' key"))?;
        let text = value
            .as_str()
            .ok_or_else(|| format!("'{key}' is not a string"))?
            .trim();
        if text.is_empty() {
            return Err(format!("'{key}' is empty"));
        }
        Ok(text.to_string())
    };

    Ok(GeneratedEmail {
        subject: read("subject")?,
        body: read("body")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn contact_with(
        name: Option<&str>,
        title: Option<&str>,
        company: Option<&str>,
    ) -> HrContact {
        HrContact {
            id: Uuid::new_v4(),
            email: "hr@acme.com".to_string(),
            phone: None,
            contact_name: name.map(String::from),
            contact_title: title.map(String::from),
            company: company.map(String::from),
            job_description: "Senior Rust engineer".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_compose_context_uses_present_fields() {
        let contact = contact_with(Some("Dana"), Some("Recruiter"), Some("Acme"));
        let ctx = compose_context("resume".to_string(), &contact);
        assert_eq!(ctx.contact_name, "Dana");
        assert_eq!(ctx.contact_title, "Recruiter");
        assert_eq!(ctx.company, "Acme");
    }

    #[test]
    fn test_compose_context_substitutes_sentinel_for_absent() {
        let contact = contact_with(None, None, None);
        let ctx = compose_context("resume".to_string(), &contact);
        assert_eq!(ctx.contact_name, UNKNOWN_SENDER);
        assert_eq!(ctx.contact_title, UNKNOWN_SENDER);
        assert_eq!(ctx.company, UNKNOWN_SENDER);
    }

    #[test]
    fn test_compose_context_treats_blank_as_absent() {
        let contact = contact_with(Some("   "), None, Some(""));
        let ctx = compose_context("resume".to_string(), &contact);
        assert_eq!(ctx.contact_name, UNKNOWN_SENDER);
        assert_eq!(ctx.company, UNKNOWN_SENDER);
    }

    #[test]
    fn test_build_prompt_fills_every_placeholder() {
        let contact = contact_with(Some("Dana"), None, Some("Acme"));
        let ctx = compose_context("eight years of Rust".to_string(), &contact);
        let prompt = build_prompt(&ctx);
        assert!(prompt.contains("eight years of Rust"));
        assert!(prompt.contains("Senior Rust engineer"));
        assert!(prompt.contains("Name: Dana"));
        assert!(prompt.contains("Title: Unknown"));
        assert!(prompt.contains("Company: Acme"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_validate_payload_accepts_well_formed() {
        let payload = json!({"subject": "Re: Rust role", "body": "Hello Dana, ..."});
        let email = validate_email_payload(&payload).unwrap();
        assert_eq!(email.subject, "Re: Rust role");
        assert_eq!(email.body, "Hello Dana, ...");
    }

    #[test]
    fn test_validate_payload_rejects_missing_subject() {
        let payload = json!({"body": "Hello"});
        let error = validate_email_payload(&payload).unwrap_err();
        assert!(error.contains("subject"));
    }

    #[test]
    fn test_validate_payload_rejects_missing_body() {
        let payload = json!({"subject": "Hi"});
        let error = validate_email_payload(&payload).unwrap_err();
        assert!(error.contains("body"));
    }

    #[test]
    fn test_validate_payload_rejects_empty_fields() {
        let payload = json!({"subject": "  ", "body": "Hello"});
        assert!(validate_email_payload(&payload).is_err());
    }

    #[test]
    fn test_validate_payload_rejects_non_string_fields() {
        let payload = json!({"subject": 42, "body": "Hello"});
        let error = validate_email_payload(&payload).unwrap_err();
        assert!(error.contains("not a string"));
    }

    #[test]
    fn test_validate_payload_ignores_extra_keys() {
        let payload = json!({"subject": "Hi", "body": "Hello", "tone": "warm"});
        assert!(validate_email_payload(&payload).is_ok());
    }
}
