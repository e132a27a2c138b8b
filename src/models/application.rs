//! Job application and assignment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::coding_problem::Difficulty;
use super::job::EmploymentType;

/// Review pipeline: pending → reviewing → shortlisted → accepted, with
/// rejection possible from any open state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewing,
    Shortlisted,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_final(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Pending, Reviewing)
                | (Reviewing, Shortlisted)
                | (Shortlisted, Accepted)
                | (Pending | Reviewing | Shortlisted, Rejected)
        )
    }
}

/// Post-hire tracking, independent of the review status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "placement_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlacementStatus {
    #[default]
    Pending,
    InProgress,
    Placed,
    NotPlaced,
}

/// Column list for [`JobApplication`]; the resume blob is never loaded with the row
pub const APPLICATION_COLUMNS: &str = r#"
    a.id, a.job_id, a.candidate_id, a.cover_letter,
    a.resume_data IS NOT NULL AS has_resume,
    a.status, a.notes, a.placement_status,
    a.placement_start_date, a.offer_accepted, a.offer_details,
    a.compensation_salary, a.compensation_currency, a.compensation_period,
    a.created_at, a.updated_at
"#;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub cover_letter: Option<String>,
    pub has_resume: bool,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub placement_status: PlacementStatus,
    #[sqlx(flatten)]
    pub placement_details: PlacementDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDetails {
    #[sqlx(rename = "placement_start_date")]
    pub start_date: Option<DateTime<Utc>>,
    pub offer_accepted: Option<bool>,
    pub offer_details: Option<String>,
    #[sqlx(flatten)]
    #[serde(default)]
    pub compensation: Compensation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Compensation {
    #[sqlx(rename = "compensation_salary")]
    pub salary: Option<i64>,
    #[sqlx(rename = "compensation_currency")]
    pub currency: Option<String>,
    #[sqlx(rename = "compensation_period")]
    pub period: Option<String>,
}

impl PlacementDetails {
    /// Overlay the fields present in `update`, keeping the rest
    pub fn merge(&mut self, update: PlacementDetails) {
        if update.start_date.is_some() {
            self.start_date = update.start_date;
        }
        if update.offer_accepted.is_some() {
            self.offer_accepted = update.offer_accepted;
        }
        if update.offer_details.is_some() {
            self.offer_details = update.offer_details;
        }
        let comp = update.compensation;
        if comp.salary.is_some() {
            self.compensation.salary = comp.salary;
        }
        if comp.currency.is_some() {
            self.compensation.currency = comp.currency;
        }
        if comp.period.is_some() {
            self.compensation.period = comp.period;
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    #[sqlx(rename = "candidate_id")]
    pub id: Uuid,
    #[sqlx(rename = "candidate_name")]
    pub name: String,
    #[sqlx(rename = "candidate_email")]
    pub email: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    #[sqlx(rename = "job_id")]
    pub id: Uuid,
    #[sqlx(rename = "job_title")]
    pub title: String,
    #[sqlx(rename = "job_department")]
    pub department: String,
    #[sqlx(rename = "job_location")]
    pub location: String,
    #[sqlx(rename = "job_employment_type")]
    pub employment_type: EmploymentType,
}

/// Application joined with candidate and job summaries
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: JobApplication,
    #[sqlx(flatten)]
    pub candidate: CandidateSummary,
    #[sqlx(flatten)]
    pub job: JobSummary,
}

/// A test attached to an application
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAssignment {
    pub id: Uuid,
    pub application_id: Uuid,
    pub test_id: Uuid,
    pub test_title: String,
    pub duration_minutes: i32,
    pub assigned_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub score: Option<i32>,
}

/// A coding problem attached to an application
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemAssignment {
    pub id: Uuid,
    pub application_id: Uuid,
    pub problem_id: Uuid,
    pub problem_title: String,
    pub difficulty: Difficulty,
    pub assigned_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub score: Option<i32>,
}

/// Everything assigned to one application
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignments {
    pub assigned_tests: Vec<TestAssignment>,
    pub coding_problems: Vec<ProblemAssignment>,
}
