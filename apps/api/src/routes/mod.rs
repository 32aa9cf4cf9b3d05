pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::optimize::handlers as optimize_handlers;
use crate::personal_info::handlers as personal_info_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Optimization API
        .route(
            "/api/v1/optimize-resume",
            post(optimize_handlers::handle_optimize).get(optimize_handlers::handle_service_info),
        )
        .route(
            "/api/v1/optimize-resume/health",
            get(optimize_handlers::handle_llm_health),
        )
        // Personal-info API
        .route(
            "/api/v1/personal-info/parse",
            post(personal_info_handlers::handle_parse_personal_info),
        )
        .with_state(state)
}
