use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Returns true if the pgvector extension is installed in the connected database.
/// Similarity search and resume storage require it.
pub async fn pgvector_installed(pool: &PgPool) -> bool {
    let row: Result<Option<(i32,)>, sqlx::Error> =
        sqlx::query_as("SELECT 1 FROM pg_extension WHERE extname = 'vector'")
            .fetch_optional(pool)
            .await;

    match row {
        Ok(Some(_)) => true,
        Ok(None) => {
            warn!("pgvector extension not installed - run 'CREATE EXTENSION vector'");
            false
        }
        Err(e) => {
            warn!("pgvector check failed: {e}");
            false
        }
    }
}
