//! User registration and lookup. Users are keyed by a unique phone number.

pub mod handlers;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;

/// Registers a new user. Phone numbers are normalized before storage so the
/// same number in different formattings maps to one account.
pub async fn register_user(
    pool: &PgPool,
    phone_number: &str,
    name: &str,
    email: &str,
) -> Result<Uuid, AppError> {
    if !is_valid_phone_number(phone_number) {
        return Err(AppError::Validation(
            "phone_number must be in international format, e.g. +14155550123".to_string(),
        ));
    }
    if name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }

    let normalized = normalize_phone_number(phone_number);

    let row: (Uuid,) = sqlx::query_as(
        "INSERT INTO users (phone_number, name, email) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&normalized)
    .bind(name.trim())
    .bind(email.trim())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::Conflict(
                    "A user with this phone number already exists".to_string(),
                );
            }
        }
        AppError::Database(e)
    })?;

    Ok(row.0)
}

pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_user_by_phone(
    pool: &PgPool,
    phone_number: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone_number = $1")
        .bind(normalize_phone_number(phone_number))
        .fetch_optional(pool)
        .await
}

/// Accepts international-format numbers: a leading `+` followed by 10-15
/// digits, with spaces, hyphens, and parentheses tolerated.
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    let cleaned = normalize_phone_number(phone_number);
    let Some(digits) = cleaned.strip_prefix('+') else {
        return false;
    };
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Strips formatting, keeping only digits and a leading `+`.
pub fn normalize_phone_number(phone_number: &str) -> String {
    phone_number
        .char_indices()
        .filter(|&(i, c)| c.is_ascii_digit() || (c == '+' && i == 0))
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plain() {
        assert!(is_valid_phone_number("+14155550123"));
    }

    #[test]
    fn test_valid_with_separators() {
        assert!(is_valid_phone_number("+1-415-555-0123"));
        assert!(is_valid_phone_number("+1 (415) 555-0123"));
    }

    #[test]
    fn test_invalid_missing_plus() {
        assert!(!is_valid_phone_number("14155550123"));
    }

    #[test]
    fn test_invalid_too_short() {
        assert!(!is_valid_phone_number("+12345"));
    }

    #[test]
    fn test_invalid_too_long() {
        assert!(!is_valid_phone_number("+1234567890123456"));
    }

    #[test]
    fn test_invalid_letters() {
        assert!(!is_valid_phone_number("+1415call0123"));
    }

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(normalize_phone_number("+1 (415) 555-0123"), "+14155550123");
    }

    #[test]
    fn test_normalize_keeps_only_leading_plus() {
        assert_eq!(normalize_phone_number("+1+415"), "+1415");
    }
}
