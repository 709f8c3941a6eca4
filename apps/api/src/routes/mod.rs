pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening wizard
        .route("/api/v1/screening", get(handlers::handle_get_screen))
        .route("/api/v1/screening/next", post(handlers::handle_next))
        .route("/api/v1/screening/back", post(handlers::handle_back))
        .route(
            "/api/v1/screening/language",
            put(handlers::handle_set_language),
        )
        .route("/api/v1/screening/reset", post(handlers::handle_reset))
        // Operator
        .route("/api/v1/records/count", get(handlers::handle_record_count))
        .with_state(state)
}
