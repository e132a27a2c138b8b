//! Multiple-choice test (assessment) and result handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Test routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_tests).post(handler::create_test))
        .route("/{id}", get(handler::get_test))
        .route("/{id}/submit", post(handler::submit_test))
}

/// Result routes
pub fn result_routes() -> Router<AppState> {
    Router::new().route("/", get(handler::list_results))
}
