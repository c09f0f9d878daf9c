use sqlx::PgPool;

use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Clients are constructed once at startup and passed down explicitly; no
/// module reaches for a global connection or HTTP client.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
}
