//! Job and application request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    constants::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_TITLE_LENGTH},
    db::repositories::JobFields,
    models::{
        ApplicationStatus, EmploymentType, ExperienceLevel, JobStatus, PlacementDetails,
        PlacementStatus, Salary, SalaryPeriod,
    },
    utils::validation::{validate_not_blank, validate_salary_range},
};

/// Create or replace a job posting
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_job_salary))]
pub struct JobRequest {
    #[validate(length(max = MAX_TITLE_LENGTH), custom(function = validate_not_blank))]
    pub title: String,
    #[validate(length(max = MAX_NAME_LENGTH), custom(function = validate_not_blank))]
    pub department: String,
    #[validate(length(max = MAX_NAME_LENGTH), custom(function = validate_not_blank))]
    pub location: String,
    pub employment_type: EmploymentType,
    pub experience_level: ExperienceLevel,
    #[validate(length(max = MAX_DESCRIPTION_LENGTH), custom(function = validate_not_blank))]
    pub description: String,
    #[validate(length(max = MAX_DESCRIPTION_LENGTH), custom(function = validate_not_blank))]
    pub requirements: String,
    #[validate(length(max = MAX_DESCRIPTION_LENGTH), custom(function = validate_not_blank))]
    pub responsibilities: String,
    #[serde(default)]
    pub salary: SalaryRequest,
    #[serde(default)]
    pub status: JobStatus,
}

/// Salary block; currency and period fall back to `USD` / `yearly`
#[derive(Debug, Default, Deserialize)]
pub struct SalaryRequest {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub currency: Option<String>,
    pub period: Option<SalaryPeriod>,
}

impl From<&SalaryRequest> for Salary {
    fn from(req: &SalaryRequest) -> Self {
        let defaults = Salary::default();
        Self {
            min: req.min,
            max: req.max,
            currency: req
                .currency
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_uppercase)
                .unwrap_or(defaults.currency),
            period: req.period.unwrap_or(defaults.period),
        }
    }
}

fn validate_job_salary(job: &JobRequest) -> Result<(), ValidationError> {
    validate_salary_range(job.salary.min, job.salary.max)
}

impl JobRequest {
    pub fn as_fields<'a>(&'a self, salary: &'a Salary) -> JobFields<'a> {
        JobFields {
            title: self.title.trim(),
            department: self.department.trim(),
            location: self.location.trim(),
            employment_type: self.employment_type,
            experience_level: self.experience_level,
            description: &self.description,
            requirements: &self.requirements,
            responsibilities: &self.responsibilities,
            salary,
            status: self.status,
        }
    }
}

/// Review pipeline move
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub notes: Option<String>,
}

/// Tests and coding problems to attach to an application
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_assignment_not_empty))]
pub struct AssignRequest {
    #[serde(default)]
    pub tests: Vec<Uuid>,
    #[serde(default)]
    pub coding_problems: Vec<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

fn validate_assignment_not_empty(req: &AssignRequest) -> Result<(), ValidationError> {
    if req.tests.is_empty() && req.coding_problems.is_empty() {
        let mut err = ValidationError::new("assignments");
        err.message = Some("Assign at least one test or coding problem".into());
        return Err(err);
    }
    Ok(())
}

/// Placement tracking update; details are merged into the stored ones
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest {
    pub placement_status: PlacementStatus,
    pub placement_details: Option<PlacementDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(salary: serde_json::Value) -> JobRequest {
        serde_json::from_value(serde_json::json!({
            "title": "Backend Engineer",
            "department": "Platform",
            "location": "Remote",
            "employmentType": "Full-time",
            "experienceLevel": "Mid Level",
            "description": "Build APIs",
            "requirements": "Rust",
            "responsibilities": "Ship",
            "salary": salary
        }))
        .unwrap()
    }

    #[test]
    fn test_salary_defaults_applied() {
        let req = job(serde_json::json!({ "min": 50000, "max": 90000, "currency": "eur" }));
        assert!(req.validate().is_ok());
        assert_eq!(req.status, JobStatus::Active);

        let salary = Salary::from(&req.salary);
        assert_eq!(salary.currency, "EUR");
        assert_eq!(salary.period, SalaryPeriod::Yearly);

        let salary = Salary::from(&SalaryRequest::default());
        assert_eq!(salary.currency, "USD");
    }

    #[test]
    fn test_inverted_salary_range_rejected() {
        let req = job(serde_json::json!({ "min": 90000, "max": 50000 }));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_assignment_requires_something() {
        let req: AssignRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(req.validate().is_err());

        let req: AssignRequest = serde_json::from_value(serde_json::json!({
            "tests": [Uuid::new_v4()],
            "dueDate": "2026-11-01T00:00:00Z"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(req.coding_problems.is_empty());
    }

    #[test]
    fn test_placement_request_shape() {
        let req: PlacementRequest = serde_json::from_value(serde_json::json!({
            "placementStatus": "in_progress",
            "placementDetails": { "offerAccepted": true }
        }))
        .unwrap();
        assert_eq!(req.placement_status, PlacementStatus::InProgress);
        assert_eq!(req.placement_details.and_then(|d| d.offer_accepted), Some(true));
    }
}
