//! Coding problem model and evaluation results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

use crate::constants::HIDDEN_PLACEHOLDER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "problem_difficulty")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Input/expected-output pair; hidden cases are never shown to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub is_hidden: bool,
}

/// Starter code for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCode {
    pub language: String,
    pub code: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingProblem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub time_limit_ms: i32,
    pub memory_limit_mb: i32,
    pub test_cases: Json<Vec<TestCase>>,
    pub template_code: Json<Vec<TemplateCode>>,
    pub constraints: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl CodingProblem {
    /// Problem with only the non-hidden cases, for the sample view
    pub fn with_visible_cases(mut self) -> Self {
        self.test_cases.0.retain(|tc| !tc.is_hidden);
        self
    }

    /// CPU time limit in seconds, as the judge expects it
    pub fn cpu_time_limit_secs(&self) -> f64 {
        f64::from(self.time_limit_ms) / 1000.0
    }

    /// Memory limit in kilobytes, as the judge expects it
    pub fn memory_limit_kb(&self) -> i64 {
        i64::from(self.memory_limit_mb) * 1024
    }
}

/// Listing view without test cases
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub time_limit_ms: i32,
    pub memory_limit_mb: i32,
    pub template_code: Json<Vec<TemplateCode>>,
    pub constraints: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Verdict for one test case
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub passed: bool,
    /// Judge status description, or "Runtime Error" when the judge call failed
    pub status: String,
    pub input: String,
    pub expected_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub hidden: bool,
}

impl CaseResult {
    /// Replace input and expected output of hidden cases with a placeholder
    pub fn redacted(mut self) -> Self {
        if self.hidden {
            self.input = HIDDEN_PLACEHOLDER.to_string();
            self.expected_output = HIDDEN_PLACEHOLDER.to_string();
        }
        self
    }
}

/// Aggregate verdict of one run over a problem's cases
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub success: bool,
    pub results: Vec<CaseResult>,
}

impl EvaluationReport {
    /// Successful only when at least one case ran and all of them passed
    pub fn from_results(results: Vec<CaseResult>) -> Self {
        let success = !results.is_empty() && results.iter().all(|r| r.passed);
        Self {
            success,
            results: results.into_iter().map(CaseResult::redacted).collect(),
        }
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(passed: bool, hidden: bool) -> CaseResult {
        CaseResult {
            passed,
            status: "Accepted".to_string(),
            input: "2 7 11 15\n9".to_string(),
            expected_output: "[0,1]".to_string(),
            actual_output: Some("[0,1]".to_string()),
            time: None,
            memory: None,
            error: None,
            hidden,
        }
    }

    #[test]
    fn test_empty_report_is_not_success() {
        assert!(!EvaluationReport::from_results(vec![]).success);
    }

    #[test]
    fn test_report_redacts_hidden_cases() {
        let report = EvaluationReport::from_results(vec![case(true, false), case(true, true)]);
        assert!(report.success);
        assert_eq!(report.results[0].input, "2 7 11 15\n9");
        assert_eq!(report.results[1].input, HIDDEN_PLACEHOLDER);
        assert_eq!(report.results[1].expected_output, HIDDEN_PLACEHOLDER);
    }

    #[test]
    fn test_limits_are_converted_for_the_judge() {
        let problem = CodingProblem {
            id: Uuid::new_v4(),
            title: "Two Sum".to_string(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            time_limit_ms: 2000,
            memory_limit_mb: 256,
            test_cases: Json(vec![
                TestCase {
                    input: "a".to_string(),
                    expected_output: "b".to_string(),
                    is_hidden: false,
                },
                TestCase {
                    input: "c".to_string(),
                    expected_output: "d".to_string(),
                    is_hidden: true,
                },
            ]),
            template_code: Json(vec![]),
            constraints: None,
            tags: vec![],
            created_at: Utc::now(),
        };
        assert_eq!(problem.cpu_time_limit_secs(), 2.0);
        assert_eq!(problem.memory_limit_kb(), 262_144);
        assert_eq!(problem.with_visible_cases().test_cases.0.len(), 1);
    }
}
