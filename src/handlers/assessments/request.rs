//! Test request DTOs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_TEST_DURATION_MINUTES, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH},
    models::Question,
    utils::validation::{validate_not_blank, validate_options},
};

/// New multiple-choice test
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestRequest {
    #[validate(length(max = MAX_TITLE_LENGTH), custom(function = validate_not_blank))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,
    #[serde(default = "default_duration", alias = "duration")]
    #[validate(range(min = 1, max = 600))]
    pub duration_minutes: i32,
    #[validate(length(min = 1), nested)]
    pub questions: Vec<QuestionRequest>,
}

fn default_duration() -> i32 {
    DEFAULT_TEST_DURATION_MINUTES
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[validate(custom(function = validate_not_blank))]
    pub question_text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl CreateTestRequest {
    /// Questions with freshly assigned ids
    pub fn questions(&self) -> Vec<Question> {
        self.questions
            .iter()
            .map(|q| Question {
                id: Uuid::new_v4(),
                question_text: q.question_text.trim().to_string(),
                options: q.options.clone(),
                correct_answer: q.correct_answer.clone(),
            })
            .collect()
    }
}

/// Answers keyed by question id
#[derive(Debug, Deserialize)]
pub struct SubmitTestRequest {
    #[serde(default)]
    pub answers: HashMap<String, String>,
}
