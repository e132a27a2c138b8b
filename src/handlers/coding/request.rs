//! Coding problem and code execution request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{
        DEFAULT_MEMORY_LIMIT_MB, DEFAULT_TIME_LIMIT_MS, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH,
    },
    db::repositories::ProblemFields,
    models::{Difficulty, TemplateCode, TestCase},
    utils::validation::{validate_not_blank, validate_source_code},
};

/// New coding problem; also the record format of the seed file
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemRequest {
    #[validate(length(max = MAX_TITLE_LENGTH), custom(function = validate_not_blank))]
    pub title: String,
    #[validate(length(max = MAX_DESCRIPTION_LENGTH), custom(function = validate_not_blank))]
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default = "default_time_limit", alias = "timeLimit")]
    #[validate(range(min = 100, max = 30000))]
    pub time_limit_ms: i32,
    #[serde(default = "default_memory_limit", alias = "memoryLimit")]
    #[validate(range(min = 16, max = 1024))]
    pub memory_limit_mb: i32,
    #[validate(length(min = 1))]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub template_code: Vec<TemplateCode>,
    pub constraints: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_time_limit() -> i32 {
    DEFAULT_TIME_LIMIT_MS
}

fn default_memory_limit() -> i32 {
    DEFAULT_MEMORY_LIMIT_MB
}

impl CreateProblemRequest {
    pub fn as_fields(&self) -> ProblemFields<'_> {
        ProblemFields {
            title: self.title.trim(),
            description: &self.description,
            difficulty: self.difficulty,
            time_limit_ms: self.time_limit_ms,
            memory_limit_mb: self.memory_limit_mb,
            test_cases: &self.test_cases,
            template_code: &self.template_code,
            constraints: self.constraints.as_deref(),
            tags: &self.tags,
        }
    }
}

/// Code run against a problem
#[derive(Debug, Deserialize, Validate)]
pub struct SolutionRequest {
    #[validate(custom(function = validate_source_code))]
    pub code: String,
    #[validate(length(min = 1))]
    pub language: String,
}

/// Free-form execution; language falls back to JavaScript
#[derive(Debug, Deserialize, Validate)]
pub struct ExecuteRequest {
    #[validate(custom(function = validate_source_code))]
    pub code: String,
    pub language: Option<String>,
    #[serde(default)]
    pub input: String,
}
