//! Job and application handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;

/// Job routes; listing and detail are public
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_jobs).post(handler::create_job))
        .route("/applications/me", get(handler::my_applications))
        .route("/applications/{application_id}/resume", get(handler::application_resume))
        .route(
            "/{id}",
            get(handler::get_job).put(handler::update_job).delete(handler::delete_job),
        )
        .route("/{id}/apply", post(handler::apply))
        .route("/{id}/applications", get(handler::list_job_applications))
        .route(
            "/{id}/applications/{application_id}/status",
            patch(handler::update_application_status),
        )
        .route(
            "/{id}/applications/{application_id}/assign-tests",
            post(handler::assign_tests),
        )
        .route(
            "/{id}/applications/{application_id}/placement",
            patch(handler::update_placement),
        )
        .route(
            "/{id}/applications/{application_id}/tests",
            get(handler::get_assignments),
        )
}
