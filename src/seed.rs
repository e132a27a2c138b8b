//! Sample data loader behind the `seed` binary
//!
//! Seed files use the same JSON shape as `POST /tests` and
//! `POST /coding-problems`. Records whose title already exists are skipped,
//! so running the loader twice is harmless.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    db::repositories::{CodingProblemRepository, TestRepository},
    error::{AppError, AppResult},
    handlers::{assessments::request::CreateTestRequest, coding::request::CreateProblemRequest},
    services::{CodingService, TestService},
};

pub const TESTS_FILE: &str = "tests.json";
pub const CODING_PROBLEMS_FILE: &str = "coding_problems.json";

/// Counts from one seeding pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Parse and validate a seed file's records
pub fn parse<T: DeserializeOwned + Validate>(raw: &str) -> AppResult<Vec<T>> {
    let records: Vec<T> = serde_json::from_str(raw)
        .map_err(|e| AppError::InvalidInput(format!("Invalid seed file: {e}")))?;

    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

pub async fn read<T: DeserializeOwned + Validate>(path: &Path) -> AppResult<Vec<T>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    parse(&raw)
}

pub async fn seed_tests(pool: &PgPool, tests: &[CreateTestRequest]) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    for test in tests {
        let title = test.title.trim();
        if TestRepository::find_by_title(pool, title).await?.is_some() {
            tracing::info!(title, "Test already present, skipping");
            report.skipped += 1;
            continue;
        }

        TestService::create(pool, title, &test.description, test.duration_minutes, &test.questions()).await?;
        report.inserted += 1;
    }

    Ok(report)
}

pub async fn seed_coding_problems(pool: &PgPool, problems: &[CreateProblemRequest]) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    for problem in problems {
        let fields = problem.as_fields();
        if CodingProblemRepository::find_by_title(pool, fields.title).await?.is_some() {
            tracing::info!(title = fields.title, "Coding problem already present, skipping");
            report.skipped += 1;
            continue;
        }

        CodingService::create(pool, &fields).await?;
        report.inserted += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLED_TESTS: &str = include_str!("../seeds/tests.json");
    const BUNDLED_PROBLEMS: &str = include_str!("../seeds/coding_problems.json");

    #[test]
    fn test_bundled_tests_are_valid() {
        let tests: Vec<CreateTestRequest> = parse(BUNDLED_TESTS).unwrap();
        assert!(!tests.is_empty());

        for test in &tests {
            for q in test.questions() {
                assert!(q.options.contains(&q.correct_answer), "{}", q.question_text);
            }
        }
        assert_eq!(tests[0].title, "JavaScript Basics");
        assert_eq!(tests[0].duration_minutes, 20);
    }

    #[test]
    fn test_bundled_two_sum_has_one_hidden_case() {
        let problems: Vec<CreateProblemRequest> = parse(BUNDLED_PROBLEMS).unwrap();
        let two_sum = problems.iter().find(|p| p.title == "Two Sum").unwrap();

        let (hidden, visible): (Vec<_>, Vec<_>) = two_sum.test_cases.iter().partition(|c| c.is_hidden);
        assert_eq!(visible.len(), 3);
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].expected_output, "[2,5]");
    }

    #[test]
    fn test_invalid_records_are_rejected() {
        let raw = r#"[{"title": "Empty", "questions": []}]"#;
        assert!(parse::<CreateTestRequest>(raw).is_err());
        assert!(parse::<CreateTestRequest>("not json").is_err());
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_seeding_twice_skips_existing() {
        let pool = crate::test_utils::test_pool().await;
        let problems: Vec<CreateProblemRequest> = parse(BUNDLED_PROBLEMS).unwrap();

        seed_coding_problems(&pool, &problems).await.unwrap();
        let again = seed_coding_problems(&pool, &problems).await.unwrap();
        assert_eq!(again, SeedReport { inserted: 0, skipped: problems.len() });
    }
}
