//! Profile handler implementations

use axum::{
    extract::{Multipart, Path, State},
    response::Response,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::repositories::UserFile,
    error::AppResult,
    handlers::files::{file_response, Disposition},
    middleware::auth::AuthenticatedUser,
    models::User,
    services::ProfileService,
    state::AppState,
    utils::{FileKind, UploadForm},
};

use super::request::UpdateProfileRequest;

/// Get the caller's profile
pub async fn get_profile(State(state): State<AppState>, auth_user: AuthenticatedUser) -> AppResult<Json<User>> {
    let user = ProfileService::get(state.db(), &auth_user.id).await?;
    Ok(Json(user))
}

/// Update profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<User>> {
    payload.validate()?;

    let user = ProfileService::update(state.db(), &auth_user.id, &payload.as_update()).await?;
    Ok(Json(user))
}

/// Upload or replace the profile photo (multipart field `photo`)
pub async fn upload_photo(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    multipart: Multipart,
) -> AppResult<Json<User>> {
    let file = UploadForm::collect(multipart)
        .await?
        .require_file("photo", FileKind::Image)?;

    let user = ProfileService::upload(state.db(), &auth_user.id, UserFile::Photo, &file).await?;
    Ok(Json(user))
}

/// Upload or replace the resume (multipart field `resume`)
pub async fn upload_resume(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    multipart: Multipart,
) -> AppResult<Json<User>> {
    let file = UploadForm::collect(multipart)
        .await?
        .require_file("resume", FileKind::Document)?;

    let user = ProfileService::upload(state.db(), &auth_user.id, UserFile::Resume, &file).await?;
    Ok(Json(user))
}

pub async fn delete_photo(State(state): State<AppState>, auth_user: AuthenticatedUser) -> AppResult<Json<User>> {
    let user = ProfileService::remove(state.db(), &auth_user.id, UserFile::Photo).await?;
    Ok(Json(user))
}

pub async fn delete_resume(State(state): State<AppState>, auth_user: AuthenticatedUser) -> AppResult<Json<User>> {
    let user = ProfileService::remove(state.db(), &auth_user.id, UserFile::Resume).await?;
    Ok(Json(user))
}

/// Public photo download
pub async fn get_photo(State(state): State<AppState>, Path(user_id): Path<Uuid>) -> AppResult<Response> {
    let file = ProfileService::download(state.db(), &user_id, UserFile::Photo).await?;
    Ok(file_response(file, Disposition::Plain))
}

/// Public resume download, shown inline with its original filename
pub async fn get_resume(State(state): State<AppState>, Path(user_id): Path<Uuid>) -> AppResult<Response> {
    let file = ProfileService::download(state.db(), &user_id, UserFile::Resume).await?;
    Ok(file_response(file, Disposition::InlineNamed))
}
