//! Candidate profile service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ProfileUpdate, UserFile, UserRepository},
    error::{AppError, AppResult},
    models::{StoredFile, User},
};

/// Profile service
pub struct ProfileService;

impl ProfileService {
    /// The caller's own profile
    pub async fn get(pool: &PgPool, user_id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    pub async fn update(pool: &PgPool, user_id: &Uuid, update: &ProfileUpdate<'_>) -> AppResult<User> {
        UserRepository::update_profile(pool, user_id, update).await
    }

    /// Store a photo or resume, replacing the previous one
    pub async fn upload(pool: &PgPool, user_id: &Uuid, slot: UserFile, file: &StoredFile) -> AppResult<User> {
        tracing::debug!(user_id = %user_id, slot = ?slot, bytes = file.len(), "Storing profile file");
        UserRepository::set_file(pool, user_id, slot, file).await
    }

    pub async fn remove(pool: &PgPool, user_id: &Uuid, slot: UserFile) -> AppResult<User> {
        UserRepository::clear_file(pool, user_id, slot).await
    }

    /// Public download of a user's photo or resume
    pub async fn download(pool: &PgPool, user_id: &Uuid, slot: UserFile) -> AppResult<StoredFile> {
        let what = match slot {
            UserFile::Photo => "Photo",
            UserFile::Resume => "Resume",
        };
        UserRepository::find_file(pool, user_id, slot)
            .await?
            .ok_or_else(|| AppError::not_found(what))
    }
}
