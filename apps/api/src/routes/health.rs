use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::db::pgvector_installed;
use crate::state::AppState;

/// GET /health
/// Reports database connectivity and whether the pgvector extension is
/// installed; the service is degraded without either.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let db_connected = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    let pgvector_enabled = db_connected && pgvector_installed(&state.db).await;

    let status = if db_connected && pgvector_enabled {
        "healthy"
    } else {
        "degraded"
    };

    Json(json!({
        "status": status,
        "database": {
            "connected": db_connected,
            "pgvector_enabled": pgvector_enabled
        },
        "version": env!("CARGO_PKG_VERSION")
    }))
}
