//! Job application repository (applications and their assignments)

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        ApplicationDetail, ApplicationStatus, Assignments, JobApplication, PlacementDetails,
        PlacementStatus, ProblemAssignment, StoredFile, TestAssignment, APPLICATION_COLUMNS,
    },
};

/// Who may see an application: the candidate and the owner of the job's company
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ApplicationAccess {
    pub candidate_id: Uuid,
    pub company_user_id: Uuid,
}

impl ApplicationAccess {
    pub fn allows(&self, user_id: &Uuid) -> bool {
        self.candidate_id == *user_id || self.company_user_id == *user_id
    }
}

/// Candidate and job summaries joined onto an application as `a`
const DETAIL_SELECT: &str = r#"
    u.name AS candidate_name,
    u.email AS candidate_email,
    j.title AS job_title,
    j.department AS job_department,
    j.location AS job_location,
    j.employment_type AS job_employment_type
FROM job_applications a
JOIN users u ON u.id = a.candidate_id
JOIN jobs j ON j.id = a.job_id
"#;

/// Repository for application database operations
pub struct ApplicationRepository;

impl ApplicationRepository {
    /// Check whether the candidate already applied to the job
    pub async fn exists(pool: &PgPool, job_id: &Uuid, candidate_id: &Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM job_applications WHERE job_id = $1 AND candidate_id = $2)"#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Create an application
    pub async fn create(
        pool: &PgPool,
        job_id: &Uuid,
        candidate_id: &Uuid,
        cover_letter: Option<&str>,
        resume: Option<&StoredFile>,
    ) -> AppResult<JobApplication> {
        let sql = format!(
            r#"
            WITH a AS (
                INSERT INTO job_applications (
                    job_id, candidate_id, cover_letter,
                    resume_data, resume_content_type, resume_filename
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT {APPLICATION_COLUMNS} FROM a
            "#
        );
        let application = sqlx::query_as::<_, JobApplication>(&sql)
            .bind(job_id)
            .bind(candidate_id)
            .bind(cover_letter)
            .bind(resume.map(|f| f.data.as_slice()))
            .bind(resume.map(|f| f.content_type.as_str()))
            .bind(resume.map(|f| f.filename.as_str()))
            .fetch_one(pool)
            .await?;

        Ok(application)
    }

    /// Find an application that belongs to the given job
    pub async fn find_in_job(pool: &PgPool, id: &Uuid, job_id: &Uuid) -> AppResult<Option<JobApplication>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications a WHERE a.id = $1 AND a.job_id = $2"
        );
        let application = sqlx::query_as::<_, JobApplication>(&sql)
            .bind(id)
            .bind(job_id)
            .fetch_optional(pool)
            .await?;

        Ok(application)
    }

    /// Applications to one job, newest first
    pub async fn list_for_job(pool: &PgPool, job_id: &Uuid) -> AppResult<Vec<ApplicationDetail>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS}, {DETAIL_SELECT} WHERE a.job_id = $1 ORDER BY a.created_at DESC"
        );
        let applications = sqlx::query_as::<_, ApplicationDetail>(&sql)
            .bind(job_id)
            .fetch_all(pool)
            .await?;

        Ok(applications)
    }

    /// Applications to any job of a company, newest first
    pub async fn list_for_company(pool: &PgPool, company_id: &Uuid) -> AppResult<Vec<ApplicationDetail>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS}, {DETAIL_SELECT} WHERE j.company_id = $1 ORDER BY a.created_at DESC"
        );
        let applications = sqlx::query_as::<_, ApplicationDetail>(&sql)
            .bind(company_id)
            .fetch_all(pool)
            .await?;

        Ok(applications)
    }

    /// A candidate's own applications, newest first
    pub async fn list_for_candidate(pool: &PgPool, candidate_id: &Uuid) -> AppResult<Vec<ApplicationDetail>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS}, {DETAIL_SELECT} WHERE a.candidate_id = $1 ORDER BY a.created_at DESC"
        );
        let applications = sqlx::query_as::<_, ApplicationDetail>(&sql)
            .bind(candidate_id)
            .fetch_all(pool)
            .await?;

        Ok(applications)
    }

    /// Set the review status
    pub async fn update_status(
        pool: &PgPool,
        id: &Uuid,
        status: ApplicationStatus,
        notes: Option<&str>,
    ) -> AppResult<JobApplication> {
        let sql = format!(
            r#"
            WITH a AS (
                UPDATE job_applications
                SET status = $2, notes = COALESCE($3, notes), updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {APPLICATION_COLUMNS} FROM a
            "#
        );
        let application = sqlx::query_as::<_, JobApplication>(&sql)
            .bind(id)
            .bind(status)
            .bind(notes)
            .fetch_one(pool)
            .await?;

        Ok(application)
    }

    /// Write placement status and the full (already merged) placement details
    pub async fn update_placement(
        pool: &PgPool,
        id: &Uuid,
        status: PlacementStatus,
        details: &PlacementDetails,
    ) -> AppResult<JobApplication> {
        let sql = format!(
            r#"
            WITH a AS (
                UPDATE job_applications
                SET
                    placement_status = $2,
                    placement_start_date = $3,
                    offer_accepted = $4,
                    offer_details = $5,
                    compensation_salary = $6,
                    compensation_currency = $7,
                    compensation_period = $8,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {APPLICATION_COLUMNS} FROM a
            "#
        );
        let application = sqlx::query_as::<_, JobApplication>(&sql)
            .bind(id)
            .bind(status)
            .bind(details.start_date)
            .bind(details.offer_accepted)
            .bind(&details.offer_details)
            .bind(details.compensation.salary)
            .bind(&details.compensation.currency)
            .bind(&details.compensation.period)
            .fetch_one(pool)
            .await?;

        Ok(application)
    }

    /// Candidate and company owner of an application
    pub async fn find_access(pool: &PgPool, id: &Uuid) -> AppResult<Option<ApplicationAccess>> {
        let access = sqlx::query_as::<_, ApplicationAccess>(
            r#"
            SELECT a.candidate_id, c.user_id AS company_user_id
            FROM job_applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN companies c ON c.id = j.company_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(access)
    }

    /// Load the resume attached to an application
    pub async fn find_resume(pool: &PgPool, id: &Uuid) -> AppResult<Option<StoredFile>> {
        let file = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT
                resume_data AS data,
                COALESCE(resume_content_type, 'application/octet-stream') AS content_type,
                COALESCE(resume_filename, 'resume') AS filename
            FROM job_applications
            WHERE id = $1 AND resume_data IS NOT NULL
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(file)
    }

    /// Attach a test to an application
    pub async fn assign_test<'e, E: PgExecutor<'e>>(
        executor: E,
        application_id: &Uuid,
        test_id: &Uuid,
        due_date: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO test_assignments (application_id, test_id, due_date) VALUES ($1, $2, $3)"#,
        )
        .bind(application_id)
        .bind(test_id)
        .bind(due_date)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Attach a coding problem to an application
    pub async fn assign_problem<'e, E: PgExecutor<'e>>(
        executor: E,
        application_id: &Uuid,
        problem_id: &Uuid,
        due_date: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO problem_assignments (application_id, problem_id, due_date) VALUES ($1, $2, $3)"#,
        )
        .bind(application_id)
        .bind(problem_id)
        .bind(due_date)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Tests and coding problems assigned to an application
    pub async fn assignments(pool: &PgPool, application_id: &Uuid) -> AppResult<Assignments> {
        let assigned_tests = sqlx::query_as::<_, TestAssignment>(
            r#"
            SELECT ta.id, ta.application_id, ta.test_id, t.title AS test_title, t.duration_minutes,
                   ta.assigned_at, ta.due_date, ta.completed, ta.score
            FROM test_assignments ta
            JOIN tests t ON t.id = ta.test_id
            WHERE ta.application_id = $1
            ORDER BY ta.assigned_at
            "#,
        )
        .bind(application_id)
        .fetch_all(pool)
        .await?;

        let coding_problems = sqlx::query_as::<_, ProblemAssignment>(
            r#"
            SELECT pa.id, pa.application_id, pa.problem_id, p.title AS problem_title, p.difficulty,
                   pa.assigned_at, pa.due_date, pa.completed, pa.score
            FROM problem_assignments pa
            JOIN coding_problems p ON p.id = pa.problem_id
            WHERE pa.application_id = $1
            ORDER BY pa.assigned_at
            "#,
        )
        .bind(application_id)
        .fetch_all(pool)
        .await?;

        Ok(Assignments {
            assigned_tests,
            coding_problems,
        })
    }

    /// Mark the candidate's open assignments of a test completed
    pub async fn complete_test_assignments<'e, E: PgExecutor<'e>>(
        executor: E,
        candidate_id: &Uuid,
        test_id: &Uuid,
        score: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE test_assignments ta
            SET completed = TRUE, score = $3
            FROM job_applications a
            WHERE a.id = ta.application_id
              AND a.candidate_id = $1
              AND ta.test_id = $2
              AND NOT ta.completed
            "#,
        )
        .bind(candidate_id)
        .bind(test_id)
        .bind(score)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Mark the candidate's open assignments of a coding problem completed
    pub async fn complete_problem_assignments<'e, E: PgExecutor<'e>>(
        executor: E,
        candidate_id: &Uuid,
        problem_id: &Uuid,
        score: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE problem_assignments pa
            SET completed = TRUE, score = $3
            FROM job_applications a
            WHERE a.id = pa.application_id
              AND a.candidate_id = $1
              AND pa.problem_id = $2
              AND NOT pa.completed
            "#,
        )
        .bind(candidate_id)
        .bind(problem_id)
        .bind(score)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
