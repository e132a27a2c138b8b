//! Company handler implementations

use axum::{
    extract::{Multipart, Path, State},
    response::Response,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::files::{file_response, Disposition},
    middleware::auth::AuthenticatedUser,
    models::{ApplicationDetail, Company, CompanyStats, Job},
    services::CompanyService,
    state::AppState,
    utils::{FileKind, UploadForm},
};

use super::request::UpdateCompanyRequest;

/// Get the caller's company profile
pub async fn get_company(State(state): State<AppState>, auth_user: AuthenticatedUser) -> AppResult<Json<Company>> {
    auth_user.require_company()?;
    let company = CompanyService::for_user(state.db(), &auth_user.id).await?;
    Ok(Json(company))
}

pub async fn update_company(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateCompanyRequest>,
) -> AppResult<Json<Company>> {
    auth_user.require_company()?;
    payload.validate()?;

    let company = CompanyService::update(state.db(), &auth_user.id, &payload.as_fields()).await?;
    Ok(Json(company))
}

/// Upload or replace the logo (multipart field `logo`)
pub async fn upload_logo(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    multipart: Multipart,
) -> AppResult<Json<Company>> {
    auth_user.require_company()?;
    let file = UploadForm::collect(multipart)
        .await?
        .require_file("logo", FileKind::Image)?;

    let company = CompanyService::set_logo(state.db(), &auth_user.id, &file).await?;
    Ok(Json(company))
}

pub async fn delete_logo(State(state): State<AppState>, auth_user: AuthenticatedUser) -> AppResult<Json<Company>> {
    auth_user.require_company()?;
    let company = CompanyService::clear_logo(state.db(), &auth_user.id).await?;
    Ok(Json(company))
}

/// Public logo download
pub async fn get_logo(State(state): State<AppState>, Path(company_id): Path<Uuid>) -> AppResult<Response> {
    let file = CompanyService::logo(state.db(), &company_id).await?;
    Ok(file_response(file, Disposition::Plain))
}

/// Jobs posted by the caller's company, newest first
pub async fn list_jobs(State(state): State<AppState>, auth_user: AuthenticatedUser) -> AppResult<Json<Vec<Job>>> {
    auth_user.require_company()?;
    let jobs = CompanyService::jobs(state.db(), &auth_user.id).await?;
    Ok(Json(jobs))
}

/// Applications across all of the company's jobs
pub async fn list_applications(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<ApplicationDetail>>> {
    auth_user.require_company()?;
    let applications = CompanyService::applications(state.db(), &auth_user.id).await?;
    Ok(Json(applications))
}

pub async fn stats(State(state): State<AppState>, auth_user: AuthenticatedUser) -> AppResult<Json<CompanyStats>> {
    auth_user.require_company()?;
    let stats = CompanyService::stats(state.db(), &auth_user.id).await?;
    Ok(Json(stats))
}
