//! Job postings, applications and assignments

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{
        ApplicationRepository, CodingProblemRepository, JobFields, JobRepository, TestRepository,
    },
    error::{AppError, AppResult},
    models::{
        ApplicationDetail, ApplicationStatus, Assignments, Job, JobApplication, JobFilter,
        JobListing, PlacementDetails, PlacementStatus, StoredFile,
    },
};

use super::CompanyService;

/// Job service
pub struct JobService;

impl JobService {
    /// Public job board
    pub async fn list(pool: &PgPool, filter: &JobFilter) -> AppResult<Vec<JobListing>> {
        JobRepository::list(pool, filter).await
    }

    /// Public job detail with company summary
    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<JobListing> {
        JobRepository::find_listing(pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Job"))
    }

    /// Post a job for the caller's company
    pub async fn create(pool: &PgPool, user_id: &Uuid, fields: &JobFields<'_>) -> AppResult<Job> {
        let company = CompanyService::for_user(pool, user_id).await?;
        let job = JobRepository::create(pool, &company.id, fields).await?;
        tracing::info!(job_id = %job.id, company_id = %company.id, "Job posted");
        Ok(job)
    }

    pub async fn update(pool: &PgPool, user_id: &Uuid, job_id: &Uuid, fields: &JobFields<'_>) -> AppResult<Job> {
        let company = CompanyService::for_user(pool, user_id).await?;
        JobRepository::update(pool, job_id, &company.id, fields)
            .await?
            .ok_or_else(job_not_owned)
    }

    /// Delete an owned job and, through the foreign key, its applications
    pub async fn delete(pool: &PgPool, user_id: &Uuid, job_id: &Uuid) -> AppResult<()> {
        let company = CompanyService::for_user(pool, user_id).await?;
        if !JobRepository::delete(pool, job_id, &company.id).await? {
            return Err(job_not_owned());
        }
        tracing::info!(job_id = %job_id, "Job deleted");
        Ok(())
    }

    /// Apply to an active job; one application per candidate and job
    pub async fn apply(
        pool: &PgPool,
        candidate_id: &Uuid,
        job_id: &Uuid,
        cover_letter: Option<&str>,
        resume: Option<&StoredFile>,
    ) -> AppResult<JobApplication> {
        let job = JobRepository::find_by_id(pool, job_id)
            .await?
            .ok_or_else(|| AppError::not_found("Job"))?;

        if !job.is_accepting_applications() {
            return Err(AppError::InvalidInput(
                "This job is not accepting applications".to_string(),
            ));
        }

        if ApplicationRepository::exists(pool, job_id, candidate_id).await? {
            return Err(already_applied());
        }

        let application = ApplicationRepository::create(pool, job_id, candidate_id, cover_letter, resume)
            .await
            .map_err(|e| match e {
                AppError::AlreadyExists(_) => already_applied(),
                other => other,
            })?;

        tracing::info!(application_id = %application.id, job_id = %job_id, "Application submitted");
        Ok(application)
    }

    /// Applications to an owned job
    pub async fn applications_for_job(
        pool: &PgPool,
        user_id: &Uuid,
        job_id: &Uuid,
    ) -> AppResult<Vec<ApplicationDetail>> {
        let job = Self::owned_job(pool, user_id, job_id).await?;
        ApplicationRepository::list_for_job(pool, &job.id).await
    }

    /// Move an application along the review pipeline
    pub async fn update_status(
        pool: &PgPool,
        user_id: &Uuid,
        job_id: &Uuid,
        application_id: &Uuid,
        status: ApplicationStatus,
        notes: Option<&str>,
    ) -> AppResult<JobApplication> {
        let application = Self::owned_application(pool, user_id, job_id, application_id).await?;

        if application.status.is_final() {
            return Err(AppError::InvalidInput(format!(
                "Application is already {:?} and can no longer change",
                application.status
            )));
        }

        if !application.status.can_transition_to(status) {
            return Err(AppError::InvalidInput(format!(
                "Cannot change application status from {:?} to {:?}",
                application.status, status
            )));
        }

        ApplicationRepository::update_status(pool, application_id, status, notes).await
    }

    /// Attach tests and coding problems to an application
    pub async fn assign(
        pool: &PgPool,
        user_id: &Uuid,
        job_id: &Uuid,
        application_id: &Uuid,
        tests: &[Uuid],
        problems: &[Uuid],
        due_date: Option<DateTime<Utc>>,
    ) -> AppResult<Assignments> {
        Self::owned_application(pool, user_id, job_id, application_id).await?;

        let found = TestRepository::existing_ids(pool, tests).await?;
        if let Some(missing) = tests.iter().find(|id| !found.contains(id)) {
            return Err(AppError::InvalidInput(format!("Test {missing} does not exist")));
        }
        let found = CodingProblemRepository::existing_ids(pool, problems).await?;
        if let Some(missing) = problems.iter().find(|id| !found.contains(id)) {
            return Err(AppError::InvalidInput(format!("Coding problem {missing} does not exist")));
        }

        let mut tx = pool.begin().await?;
        for test_id in tests {
            ApplicationRepository::assign_test(&mut *tx, application_id, test_id, due_date).await?;
        }
        for problem_id in problems {
            ApplicationRepository::assign_problem(&mut *tx, application_id, problem_id, due_date).await?;
        }
        tx.commit().await?;

        tracing::info!(
            application_id = %application_id,
            tests = tests.len(),
            problems = problems.len(),
            "Assessments assigned"
        );

        ApplicationRepository::assignments(pool, application_id).await
    }

    /// Set placement status and merge in the given details
    pub async fn update_placement(
        pool: &PgPool,
        user_id: &Uuid,
        job_id: &Uuid,
        application_id: &Uuid,
        status: PlacementStatus,
        details: Option<PlacementDetails>,
    ) -> AppResult<JobApplication> {
        let application = Self::owned_application(pool, user_id, job_id, application_id).await?;

        let mut merged = application.placement_details;
        if let Some(update) = details {
            merged.merge(update);
        }

        ApplicationRepository::update_placement(pool, application_id, status, &merged).await
    }

    /// Assignments of an application, visible to its candidate and the hiring company
    pub async fn assignments(
        pool: &PgPool,
        user_id: &Uuid,
        job_id: &Uuid,
        application_id: &Uuid,
    ) -> AppResult<Assignments> {
        ApplicationRepository::find_in_job(pool, application_id, job_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application"))?;
        Self::check_access(pool, user_id, application_id).await?;

        ApplicationRepository::assignments(pool, application_id).await
    }

    /// A candidate's own applications
    pub async fn my_applications(pool: &PgPool, candidate_id: &Uuid) -> AppResult<Vec<ApplicationDetail>> {
        ApplicationRepository::list_for_candidate(pool, candidate_id).await
    }

    /// Resume attached to an application
    pub async fn application_resume(pool: &PgPool, user_id: &Uuid, application_id: &Uuid) -> AppResult<StoredFile> {
        Self::check_access(pool, user_id, application_id).await?;
        ApplicationRepository::find_resume(pool, application_id)
            .await?
            .ok_or_else(|| AppError::not_found("Resume"))
    }

    async fn check_access(pool: &PgPool, user_id: &Uuid, application_id: &Uuid) -> AppResult<()> {
        let access = ApplicationRepository::find_access(pool, application_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application"))?;

        if !access.allows(user_id) {
            return Err(AppError::Forbidden("Unauthorized".to_string()));
        }
        Ok(())
    }

    async fn owned_job(pool: &PgPool, user_id: &Uuid, job_id: &Uuid) -> AppResult<Job> {
        let company = CompanyService::for_user(pool, user_id).await?;
        JobRepository::find_owned(pool, job_id, &company.id)
            .await?
            .ok_or_else(job_not_owned)
    }

    async fn owned_application(
        pool: &PgPool,
        user_id: &Uuid,
        job_id: &Uuid,
        application_id: &Uuid,
    ) -> AppResult<JobApplication> {
        let job = Self::owned_job(pool, user_id, job_id).await?;
        ApplicationRepository::find_in_job(pool, application_id, &job.id)
            .await?
            .ok_or_else(|| AppError::not_found("Application"))
    }
}

fn job_not_owned() -> AppError {
    AppError::NotFound("Job not found or unauthorized".to_string())
}

fn already_applied() -> AppError {
    AppError::AlreadyExists("You have already applied for this job".to_string())
}
