pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extract::MAX_UPLOAD_BYTES;
use crate::state::AppState;
use crate::{hr, ingest, outreach, users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/register", post(users::handlers::handle_register))
        .route(
            "/upload-resume",
            post(ingest::handlers::handle_upload_resume),
        )
        .route(
            "/gen-email",
            post(outreach::handlers::handle_generate_email),
        )
        .route(
            "/match-resume",
            post(outreach::handlers::handle_match_resume),
        )
        .route(
            "/hr-contacts",
            post(hr::handlers::handle_create_contacts).get(hr::handlers::handle_list_contacts),
        )
        .route("/hr-contacts/:id", get(hr::handlers::handle_get_contact))
        // Allow the full 10 MiB resume plus multipart framing overhead.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .with_state(state)
}
