//! Coding problem and code execution handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Coding problem routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_problems).post(handler::create_problem))
        .route("/{id}", get(handler::get_problem))
        .route("/{id}/test", post(handler::run_samples))
        .route("/{id}/submit", post(handler::submit_solution))
}

/// Free-form execution route
pub fn execute_routes() -> Router<AppState> {
    Router::new().route("/execute", post(handler::execute))
}
