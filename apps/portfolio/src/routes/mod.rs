pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tailoring::handlers;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(pages::handle_index))
        .route("/static/portfolio.js", get(pages::handle_script))
        .route("/api/v1/portfolio", get(pages::handle_portfolio_json))
        // Resume tailoring
        .route(
            "/api/v1/tailor",
            post(handlers::handle_tailor).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
