//! Test handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::{GradedTest, PublicTest, Test, TestResult},
    services::TestService,
    state::AppState,
};

use super::request::{CreateTestRequest, SubmitTestRequest};

/// All tests, answers stripped
pub async fn list_tests(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<PublicTest>>> {
    let tests = TestService::list_public(state.db()).await?;
    Ok(Json(tests))
}

/// One test, answers stripped
pub async fn get_test(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<PublicTest>> {
    let test = TestService::get_public(state.db(), &id).await?;
    Ok(Json(test))
}

pub async fn create_test(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateTestRequest>,
) -> AppResult<(StatusCode, Json<Test>)> {
    auth_user.require_company()?;
    payload.validate()?;

    let test = TestService::create(
        state.db(),
        payload.title.trim(),
        &payload.description,
        payload.duration_minutes,
        &payload.questions(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(test)))
}

/// Grade and record an attempt
pub async fn submit_test(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitTestRequest>,
) -> AppResult<Json<GradedTest>> {
    let graded = TestService::submit(state.db(), &auth_user.id, &id, &payload.answers).await?;
    Ok(Json(graded))
}

/// The caller's past attempts, newest first
pub async fn list_results(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<TestResult>>> {
    let results = TestService::results_for_user(state.db(), &auth_user.id).await?;
    Ok(Json(results))
}
