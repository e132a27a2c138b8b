//! Test attempt results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Grading of a single question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerBreakdown {
    pub question: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// One persisted test attempt
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub test_id: Uuid,
    pub test_title: String,
    pub score: i32,
    pub total_questions: i32,
    #[serde(rename = "results")]
    pub breakdown: Json<Vec<AnswerBreakdown>>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of grading one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedTest {
    pub test_title: String,
    pub score: i32,
    pub total_questions: i32,
    #[serde(rename = "results")]
    pub breakdown: Vec<AnswerBreakdown>,
}
