//! Company profile service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ApplicationRepository, CompanyFields, CompanyRepository, JobRepository},
    error::{AppError, AppResult},
    models::{ApplicationDetail, Company, CompanyStats, Job, StoredFile},
};

/// Company service
pub struct CompanyService;

impl CompanyService {
    /// Company profile of the given user
    pub async fn for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Company> {
        CompanyRepository::find_by_user(pool, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Company profile"))
    }

    pub async fn update(pool: &PgPool, user_id: &Uuid, fields: &CompanyFields<'_>) -> AppResult<Company> {
        CompanyRepository::update(pool, user_id, fields)
            .await?
            .ok_or_else(|| AppError::not_found("Company profile"))
    }

    pub async fn set_logo(pool: &PgPool, user_id: &Uuid, file: &StoredFile) -> AppResult<Company> {
        CompanyRepository::set_logo(pool, user_id, file)
            .await?
            .ok_or_else(|| AppError::not_found("Company profile"))
    }

    pub async fn clear_logo(pool: &PgPool, user_id: &Uuid) -> AppResult<Company> {
        CompanyRepository::clear_logo(pool, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Company profile"))
    }

    /// Public download of a company logo
    pub async fn logo(pool: &PgPool, company_id: &Uuid) -> AppResult<StoredFile> {
        CompanyRepository::find_logo(pool, company_id)
            .await?
            .ok_or_else(|| AppError::not_found("Logo"))
    }

    pub async fn jobs(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Job>> {
        let company = Self::for_user(pool, user_id).await?;
        JobRepository::list_by_company(pool, &company.id).await
    }

    pub async fn applications(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<ApplicationDetail>> {
        let company = Self::for_user(pool, user_id).await?;
        ApplicationRepository::list_for_company(pool, &company.id).await
    }

    pub async fn stats(pool: &PgPool, user_id: &Uuid) -> AppResult<CompanyStats> {
        let company = Self::for_user(pool, user_id).await?;
        CompanyRepository::stats(pool, &company.id).await
    }
}
