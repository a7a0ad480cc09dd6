pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::interview::handlers as interview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Text extraction
        .route("/api/v1/resume/extract", post(extraction::handle_extract))
        // Gateway configuration
        .route(
            "/api/v1/gateway",
            get(interview::handle_gateway_status).put(interview::handle_configure_gateway),
        )
        // Generation
        .route("/api/v1/questions", post(interview::handle_generate_questions))
        .route("/api/v1/answers", post(interview::handle_generate_answer))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
