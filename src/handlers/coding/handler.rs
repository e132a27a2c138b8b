//! Coding problem handler implementations

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
    models::{CodingProblem, EvaluationReport, ProblemSummary},
    services::CodingService,
    state::AppState,
};

use super::{
    request::{CreateProblemRequest, ExecuteRequest, SolutionRequest},
    response::ExecuteResponse,
};

/// All problems, without test cases
pub async fn list_problems(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<ProblemSummary>>> {
    let problems = CodingService::list(state.db()).await?;
    Ok(Json(problems))
}

/// One problem with its visible test cases only
pub async fn get_problem(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CodingProblem>> {
    let problem = CodingService::get_sample(state.db(), &id).await?;
    Ok(Json(problem))
}

pub async fn create_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<CodingProblem>)> {
    auth_user.require_company()?;
    payload.validate()?;

    let problem = CodingService::create(state.db(), &payload.as_fields()).await?;
    Ok((StatusCode::CREATED, Json(problem)))
}

/// Run against the visible cases
pub async fn run_samples(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SolutionRequest>,
) -> AppResult<Json<EvaluationReport>> {
    payload.validate()?;

    let report =
        CodingService::run_samples(state.db(), state.judge(), &id, &payload.code, &payload.language).await?;
    Ok(Json(report))
}

/// Run against every case and record a full pass
pub async fn submit_solution(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SolutionRequest>,
) -> AppResult<Json<EvaluationReport>> {
    payload.validate()?;

    let report = CodingService::submit(
        state.db(),
        state.judge(),
        &auth_user.id,
        &id,
        &payload.code,
        &payload.language,
    )
    .await?;
    Ok(Json(report))
}

/// Run free-form code once
pub async fn execute(
    State(state): State<AppState>,
    Json(payload): Json<ExecuteRequest>,
) -> AppResult<Json<ExecuteResponse>> {
    payload.validate()?;

    let output =
        CodingService::execute(state.judge(), &payload.code, payload.language.as_deref(), &payload.input).await?;
    Ok(Json(ExecuteResponse { output }))
}
