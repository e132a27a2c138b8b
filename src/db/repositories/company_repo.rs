//! Company repository

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Company, CompanySize, CompanyStats, ContactInfo, SocialMedia, StoredFile, COMPANY_COLUMNS},
};

/// Fields written when creating or updating a company profile
#[derive(Debug, Clone)]
pub struct CompanyFields<'a> {
    pub company_name: &'a str,
    pub industry: &'a str,
    pub size: Option<CompanySize>,
    pub location: &'a str,
    pub website: Option<&'a str>,
    pub description: Option<&'a str>,
    pub social_media: &'a SocialMedia,
    pub contact_info: &'a ContactInfo,
}

/// Repository for company database operations
pub struct CompanyRepository;

impl CompanyRepository {
    /// Create the company profile of a user
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
        fields: &CompanyFields<'_>,
    ) -> AppResult<Company> {
        let sql = format!(
            r#"
            INSERT INTO companies (
                user_id, company_name, industry, size, location, website, description,
                linked_in, twitter, contact_email, contact_phone, contact_address
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {COMPANY_COLUMNS}
            "#
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(user_id)
            .bind(fields.company_name)
            .bind(fields.industry)
            .bind(fields.size)
            .bind(fields.location)
            .bind(fields.website)
            .bind(fields.description)
            .bind(&fields.social_media.linked_in)
            .bind(&fields.social_media.twitter)
            .bind(&fields.contact_info.email)
            .bind(&fields.contact_info.phone)
            .bind(&fields.contact_info.address)
            .fetch_one(executor)
            .await?;

        Ok(company)
    }

    /// Find the company owned by a user
    pub async fn find_by_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<Company>> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE user_id = $1");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(company)
    }

    /// Replace the editable profile fields
    pub async fn update(
        pool: &PgPool,
        user_id: &Uuid,
        fields: &CompanyFields<'_>,
    ) -> AppResult<Option<Company>> {
        let sql = format!(
            r#"
            UPDATE companies
            SET
                company_name = $2,
                industry = $3,
                size = $4,
                location = $5,
                website = $6,
                description = $7,
                linked_in = $8,
                twitter = $9,
                contact_email = $10,
                contact_phone = $11,
                contact_address = $12,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {COMPANY_COLUMNS}
            "#
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(user_id)
            .bind(fields.company_name)
            .bind(fields.industry)
            .bind(fields.size)
            .bind(fields.location)
            .bind(fields.website)
            .bind(fields.description)
            .bind(&fields.social_media.linked_in)
            .bind(&fields.social_media.twitter)
            .bind(&fields.contact_info.email)
            .bind(&fields.contact_info.phone)
            .bind(&fields.contact_info.address)
            .fetch_optional(pool)
            .await?;

        Ok(company)
    }

    /// Store (or replace) the logo
    pub async fn set_logo(pool: &PgPool, user_id: &Uuid, file: &StoredFile) -> AppResult<Option<Company>> {
        let sql = format!(
            r#"
            UPDATE companies
            SET logo_data = $2, logo_content_type = $3, logo_filename = $4, updated_at = NOW()
            WHERE user_id = $1
            RETURNING {COMPANY_COLUMNS}
            "#
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(user_id)
            .bind(&file.data)
            .bind(&file.content_type)
            .bind(&file.filename)
            .fetch_optional(pool)
            .await?;

        Ok(company)
    }

    /// Remove the logo
    pub async fn clear_logo(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<Company>> {
        let sql = format!(
            r#"
            UPDATE companies
            SET logo_data = NULL, logo_content_type = NULL, logo_filename = NULL, updated_at = NOW()
            WHERE user_id = $1
            RETURNING {COMPANY_COLUMNS}
            "#
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(company)
    }

    /// Load a company's logo by company id
    pub async fn find_logo(pool: &PgPool, company_id: &Uuid) -> AppResult<Option<StoredFile>> {
        let file = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT
                logo_data AS data,
                COALESCE(logo_content_type, 'application/octet-stream') AS content_type,
                COALESCE(logo_filename, 'logo') AS filename
            FROM companies
            WHERE id = $1 AND logo_data IS NOT NULL
            "#,
        )
        .bind(company_id)
        .fetch_optional(pool)
        .await?;

        Ok(file)
    }

    /// Job and application counters for a company
    pub async fn stats(pool: &PgPool, company_id: &Uuid) -> AppResult<CompanyStats> {
        let stats = sqlx::query_as::<_, CompanyStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM jobs WHERE company_id = $1) AS total_jobs,
                (SELECT COUNT(*) FROM jobs WHERE company_id = $1 AND status = 'active') AS active_jobs,
                (SELECT COUNT(*) FROM job_applications a JOIN jobs j ON j.id = a.job_id
                    WHERE j.company_id = $1) AS total_applications,
                (SELECT COUNT(*) FROM job_applications a JOIN jobs j ON j.id = a.job_id
                    WHERE j.company_id = $1 AND a.status = 'pending') AS pending_reviews
            "#,
        )
        .bind(company_id)
        .fetch_one(pool)
        .await?;

        Ok(stats)
    }
}
