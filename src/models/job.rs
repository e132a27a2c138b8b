//! Job posting model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::company::CompanySummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "employment_type")]
pub enum EmploymentType {
    #[sqlx(rename = "Full-time")]
    #[serde(rename = "Full-time")]
    FullTime,
    #[sqlx(rename = "Part-time")]
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "experience_level")]
pub enum ExperienceLevel {
    #[sqlx(rename = "Entry Level")]
    #[serde(rename = "Entry Level")]
    Entry,
    #[sqlx(rename = "Mid Level")]
    #[serde(rename = "Mid Level")]
    Mid,
    #[sqlx(rename = "Senior Level")]
    #[serde(rename = "Senior Level")]
    Senior,
    Executive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "salary_period", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SalaryPeriod {
    #[default]
    Yearly,
    Monthly,
    Hourly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

/// Job posting
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub experience_level: ExperienceLevel,
    pub description: String,
    pub requirements: String,
    pub responsibilities: String,
    #[sqlx(flatten)]
    pub salary: Salary,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn is_accepting_applications(&self) -> bool {
        self.status == JobStatus::Active
    }
}

/// Salary range
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    #[sqlx(rename = "salary_min")]
    pub min: Option<i64>,
    #[sqlx(rename = "salary_max")]
    pub max: Option<i64>,
    #[sqlx(rename = "salary_currency")]
    pub currency: String,
    #[sqlx(rename = "salary_period")]
    pub period: SalaryPeriod,
}

impl Default for Salary {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            currency: "USD".to_string(),
            period: SalaryPeriod::Yearly,
        }
    }
}

/// A job joined with its company summary
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: Job,
    #[sqlx(flatten)]
    pub company: CompanySummary,
}

/// Filters for the public job board
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub company_id: Option<Uuid>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(serde_json::to_string(&EmploymentType::FullTime).unwrap(), "\"Full-time\"");
        assert_eq!(serde_json::to_string(&ExperienceLevel::Mid).unwrap(), "\"Mid Level\"");
        let level: ExperienceLevel = serde_json::from_str("\"Executive\"").unwrap();
        assert_eq!(level, ExperienceLevel::Executive);
    }

    #[test]
    fn test_salary_defaults() {
        let salary = Salary::default();
        assert_eq!(salary.currency, "USD");
        assert_eq!(salary.period, SalaryPeriod::Yearly);
    }
}
