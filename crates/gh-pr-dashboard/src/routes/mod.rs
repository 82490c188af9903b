//! HTTP routes

mod files;
mod health;
mod prs;

use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use files::{list_files, view_files};
use health::health;
use prs::list_prs;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/prs", get(list_prs))
        .route("/api/prs/{owner}/{repo}/{pr_number}/files", get(list_files))
        .route("/api/prs/{owner}/{repo}/{pr_number}/view", get(view_files))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
