//! Company profile handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Company routes; the logo download is public
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::get_company).put(handler::update_company))
        .route("/logo", post(handler::upload_logo).delete(handler::delete_logo))
        .route("/logo/{company_id}", get(handler::get_logo))
        .route("/jobs", get(handler::list_jobs))
        .route("/applications", get(handler::list_applications))
        .route("/stats", get(handler::stats))
}
