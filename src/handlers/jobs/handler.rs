//! Job handler implementations

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::files::{file_response, Disposition},
    middleware::auth::AuthenticatedUser,
    models::{ApplicationDetail, Assignments, Job, JobApplication, JobFilter, JobListing, Salary},
    services::JobService,
    state::AppState,
    utils::{non_blank, FileKind, UploadForm},
};

use super::{
    request::{AssignRequest, JobRequest, PlacementRequest, UpdateStatusRequest},
    response::{ApplyResponse, MessageResponse},
};

/// Public job board
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> AppResult<Json<Vec<JobListing>>> {
    let jobs = JobService::list(state.db(), &filter).await?;
    Ok(Json(jobs))
}

/// Public job detail
pub async fn get_job(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<JobListing>> {
    let job = JobService::get(state.db(), &id).await?;
    Ok(Json(job))
}

pub async fn create_job(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<JobRequest>,
) -> AppResult<(StatusCode, Json<Job>)> {
    auth_user.require_company()?;
    payload.validate()?;

    let salary = Salary::from(&payload.salary);
    let job = JobService::create(state.db(), &auth_user.id, &payload.as_fields(&salary)).await?;

    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update_job(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<JobRequest>,
) -> AppResult<Json<Job>> {
    auth_user.require_company()?;
    payload.validate()?;

    let salary = Salary::from(&payload.salary);
    let job = JobService::update(state.db(), &auth_user.id, &id, &payload.as_fields(&salary)).await?;

    Ok(Json(job))
}

pub async fn delete_job(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    auth_user.require_company()?;
    JobService::delete(state.db(), &auth_user.id, &id).await?;

    Ok(Json(MessageResponse {
        message: "Job deleted successfully".to_string(),
    }))
}

/// Apply to a job (multipart `coverLetter`, optional `resume`)
pub async fn apply(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApplyResponse>)> {
    auth_user.require_candidate()?;

    let mut form = UploadForm::collect(multipart).await?;
    let resume = form.take_file("resume", FileKind::Document)?;
    let cover_letter = non_blank(form.text("coverLetter"));

    let application =
        JobService::apply(state.db(), &auth_user.id, &id, cover_letter, resume.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            message: "Application submitted successfully".to_string(),
            application,
        }),
    ))
}

/// Applications to one of the caller's jobs
pub async fn list_job_applications(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<ApplicationDetail>>> {
    auth_user.require_company()?;
    let applications = JobService::applications_for_job(state.db(), &auth_user.id, &id).await?;
    Ok(Json(applications))
}

pub async fn update_application_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((job_id, application_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<JobApplication>> {
    auth_user.require_company()?;
    payload.validate()?;

    let application = JobService::update_status(
        state.db(),
        &auth_user.id,
        &job_id,
        &application_id,
        payload.status,
        payload.notes.as_deref(),
    )
    .await?;

    Ok(Json(application))
}

pub async fn assign_tests(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((job_id, application_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<AssignRequest>,
) -> AppResult<Json<Assignments>> {
    auth_user.require_company()?;
    payload.validate()?;

    let assignments = JobService::assign(
        state.db(),
        &auth_user.id,
        &job_id,
        &application_id,
        &payload.tests,
        &payload.coding_problems,
        payload.due_date,
    )
    .await?;

    Ok(Json(assignments))
}

pub async fn update_placement(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((job_id, application_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<PlacementRequest>,
) -> AppResult<Json<JobApplication>> {
    auth_user.require_company()?;

    let application = JobService::update_placement(
        state.db(),
        &auth_user.id,
        &job_id,
        &application_id,
        payload.placement_status,
        payload.placement_details,
    )
    .await?;

    Ok(Json(application))
}

/// Assignments of an application, for its candidate or the hiring company
pub async fn get_assignments(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((job_id, application_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Assignments>> {
    let assignments = JobService::assignments(state.db(), &auth_user.id, &job_id, &application_id).await?;
    Ok(Json(assignments))
}

pub async fn my_applications(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<ApplicationDetail>>> {
    auth_user.require_candidate()?;
    let applications = JobService::my_applications(state.db(), &auth_user.id).await?;
    Ok(Json(applications))
}

/// Resume attached to an application
pub async fn application_resume(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(application_id): Path<Uuid>,
) -> AppResult<Response> {
    let file = JobService::application_resume(state.db(), &auth_user.id, &application_id).await?;
    Ok(file_response(file, Disposition::InlineNamed))
}
