//! Candidate profile handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Profile routes; downloads are public
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::get_profile).put(handler::update_profile))
        .route("/photo", post(handler::upload_photo).delete(handler::delete_photo))
        .route("/resume", post(handler::upload_resume).delete(handler::delete_resume))
        .route("/photo/{user_id}", get(handler::get_photo))
        .route("/resume/{user_id}", get(handler::get_resume))
}
