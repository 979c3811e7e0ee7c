pub mod admin;
pub mod api;
pub mod error;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/submit", post(pages::submit_form))
        .route("/health", get(api::health))
        .route("/api/stats", get(api::stats))
        .route("/api/submissions", get(api::recent).post(api::create))
        .route("/api/admin/pending", get(admin::pending))
        .route("/api/admin/submissions/:id/approve", post(admin::approve))
        .route("/api/admin/submissions/:id/reject", post(admin::reject))
        .route("/api/admin/export", get(admin::export_csv))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
