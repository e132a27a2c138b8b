//! Multiple-choice test model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// One multiple-choice question, stored inside the test's JSONB column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub questions: Json<Vec<Question>>,
    pub created_at: DateTime<Utc>,
}

/// Question as shown to a test taker
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
}

/// Test as shown to a test taker, without correct answers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub questions: Vec<PublicQuestion>,
    pub created_at: DateTime<Utc>,
}

impl Test {
    pub fn question_count(&self) -> usize {
        self.questions.0.len()
    }

    pub fn without_answers(self) -> PublicTest {
        PublicTest {
            id: self.id,
            title: self.title,
            description: self.description,
            duration_minutes: self.duration_minutes,
            questions: self
                .questions
                .0
                .into_iter()
                .map(|q| PublicQuestion {
                    id: q.id,
                    question_text: q.question_text,
                    options: q.options,
                })
                .collect(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_view_drops_answers() {
        let test = Test {
            id: Uuid::new_v4(),
            title: "JavaScript Basics".to_string(),
            description: "Fundamentals".to_string(),
            duration_minutes: 30,
            questions: Json(vec![Question {
                id: Uuid::new_v4(),
                question_text: "typeof null?".to_string(),
                options: vec!["object".to_string(), "null".to_string()],
                correct_answer: "object".to_string(),
            }]),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&test.without_answers()).unwrap();
        assert!(!json.contains("correctAnswer"));
        assert!(json.contains("typeof null?"));
    }

    #[test]
    fn test_question_id_generated_when_missing() {
        let q: Question = serde_json::from_str(
            r#"{"questionText":"2+2?","options":["3","4"],"correctAnswer":"4"}"#,
        )
        .unwrap();
        assert!(!q.id.is_nil());
    }
}
