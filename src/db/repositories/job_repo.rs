//! Job repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{EmploymentType, ExperienceLevel, Job, JobFilter, JobListing, JobStatus, Salary},
};

/// Columns of the company summary joined onto a job as `c`
const LISTING_COLUMNS: &str = r#"
    j.*,
    c.company_name, c.industry,
    c.location AS company_location,
    c.description AS company_description,
    c.website AS company_website,
    c.logo_data IS NOT NULL AS company_has_logo
"#;

/// Fields written when creating or updating a job
#[derive(Debug, Clone)]
pub struct JobFields<'a> {
    pub title: &'a str,
    pub department: &'a str,
    pub location: &'a str,
    pub employment_type: EmploymentType,
    pub experience_level: ExperienceLevel,
    pub description: &'a str,
    pub requirements: &'a str,
    pub responsibilities: &'a str,
    pub salary: &'a Salary,
    pub status: JobStatus,
}

/// Repository for job database operations
pub struct JobRepository;

impl JobRepository {
    /// Create a job for a company
    pub async fn create(pool: &PgPool, company_id: &Uuid, fields: &JobFields<'_>) -> AppResult<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (
                company_id, title, department, location, employment_type, experience_level,
                description, requirements, responsibilities,
                salary_min, salary_max, salary_currency, salary_period, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(fields.title)
        .bind(fields.department)
        .bind(fields.location)
        .bind(fields.employment_type)
        .bind(fields.experience_level)
        .bind(fields.description)
        .bind(fields.requirements)
        .bind(fields.responsibilities)
        .bind(fields.salary.min)
        .bind(fields.salary.max)
        .bind(&fields.salary.currency)
        .bind(fields.salary.period)
        .bind(fields.status)
        .fetch_one(pool)
        .await?;

        Ok(job)
    }

    /// Find job by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(r#"SELECT * FROM jobs WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(job)
    }

    /// Find a job only if it belongs to the given company
    pub async fn find_owned(pool: &PgPool, id: &Uuid, company_id: &Uuid) -> AppResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(r#"SELECT * FROM jobs WHERE id = $1 AND company_id = $2"#)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await?;

        Ok(job)
    }

    /// Find job by ID with its company summary
    pub async fn find_listing(pool: &PgPool, id: &Uuid) -> AppResult<Option<JobListing>> {
        let sql = format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM jobs j
            JOIN companies c ON c.id = j.company_id
            WHERE j.id = $1
            "#
        );
        let listing = sqlx::query_as::<_, JobListing>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(listing)
    }

    /// Public job board, newest first
    pub async fn list(pool: &PgPool, filter: &JobFilter) -> AppResult<Vec<JobListing>> {
        let sql = format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM jobs j
            JOIN companies c ON c.id = j.company_id
            WHERE
                ($1::job_status IS NULL OR j.status = $1)
                AND ($2::uuid IS NULL OR j.company_id = $2)
                AND ($3::text IS NULL OR j.title ILIKE $3)
                AND ($4::text IS NULL OR j.location ILIKE $4)
            ORDER BY j.created_at DESC
            "#
        );
        let jobs = sqlx::query_as::<_, JobListing>(&sql)
            .bind(filter.status)
            .bind(filter.company_id)
            .bind(filter.title.as_deref().map(contains_pattern))
            .bind(filter.location.as_deref().map(contains_pattern))
            .fetch_all(pool)
            .await?;

        Ok(jobs)
    }

    /// All jobs of a company, newest first
    pub async fn list_by_company(pool: &PgPool, company_id: &Uuid) -> AppResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"SELECT * FROM jobs WHERE company_id = $1 ORDER BY created_at DESC"#,
        )
        .bind(company_id)
        .fetch_all(pool)
        .await?;

        Ok(jobs)
    }

    /// Replace the editable fields of an owned job
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        company_id: &Uuid,
        fields: &JobFields<'_>,
    ) -> AppResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET
                title = $3,
                department = $4,
                location = $5,
                employment_type = $6,
                experience_level = $7,
                description = $8,
                requirements = $9,
                responsibilities = $10,
                salary_min = $11,
                salary_max = $12,
                salary_currency = $13,
                salary_period = $14,
                status = $15,
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(fields.title)
        .bind(fields.department)
        .bind(fields.location)
        .bind(fields.employment_type)
        .bind(fields.experience_level)
        .bind(fields.description)
        .bind(fields.requirements)
        .bind(fields.responsibilities)
        .bind(fields.salary.min)
        .bind(fields.salary.max)
        .bind(&fields.salary.currency)
        .bind(fields.salary.period)
        .bind(fields.status)
        .fetch_optional(pool)
        .await?;

        Ok(job)
    }

    /// Delete an owned job; applications go with it through the foreign key
    pub async fn delete(pool: &PgPool, id: &Uuid, company_id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM jobs WHERE id = $1 AND company_id = $2"#)
            .bind(id)
            .bind(company_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// ILIKE pattern matching `needle` anywhere, with wildcards in the input escaped
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
