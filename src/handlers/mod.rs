//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.
//! Routes that need a caller take the `AuthenticatedUser` extractor. Trees
//! that are private as a whole also sit behind `auth_middleware`.

pub mod assessments;
pub mod auth;
pub mod coding;
pub mod company;
pub mod files;
pub mod health;
pub mod jobs;
pub mod profile;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let private = |router: Router<AppState>| {
        router.route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
    };

    Router::new()
        .merge(health::routes())
        .merge(coding::execute_routes())
        .nest("/auth", auth::routes())
        .nest("/profile", profile::routes())
        .nest("/company", company::routes())
        .nest("/jobs", jobs::routes())
        .nest("/tests", assessments::routes())
        .nest("/results", private(assessments::result_routes()))
        .nest("/coding-problems", coding::routes())
}
