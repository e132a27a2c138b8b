//! Coding problem repository

use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CodingProblem, Difficulty, ProblemSummary, TemplateCode, TestCase},
};

/// Fields written when creating a coding problem
#[derive(Debug, Clone)]
pub struct ProblemFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub difficulty: Difficulty,
    pub time_limit_ms: i32,
    pub memory_limit_mb: i32,
    pub test_cases: &'a [TestCase],
    pub template_code: &'a [TemplateCode],
    pub constraints: Option<&'a str>,
    pub tags: &'a [String],
}

/// Repository for coding problems
pub struct CodingProblemRepository;

impl CodingProblemRepository {
    /// Create a coding problem
    pub async fn create(pool: &PgPool, fields: &ProblemFields<'_>) -> AppResult<CodingProblem> {
        let problem = sqlx::query_as::<_, CodingProblem>(
            r#"
            INSERT INTO coding_problems (
                title, description, difficulty, time_limit_ms, memory_limit_mb,
                test_cases, template_code, constraints, tags
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.difficulty)
        .bind(fields.time_limit_ms)
        .bind(fields.memory_limit_mb)
        .bind(Json(fields.test_cases))
        .bind(Json(fields.template_code))
        .bind(fields.constraints)
        .bind(fields.tags)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }

    /// Find problem by ID, including every test case
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<CodingProblem>> {
        let problem = sqlx::query_as::<_, CodingProblem>(r#"SELECT * FROM coding_problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// Find problem by title (used by the seed tool)
    pub async fn find_by_title(pool: &PgPool, title: &str) -> AppResult<Option<CodingProblem>> {
        let problem =
            sqlx::query_as::<_, CodingProblem>(r#"SELECT * FROM coding_problems WHERE title = $1"#)
                .bind(title)
                .fetch_optional(pool)
                .await?;

        Ok(problem)
    }

    /// All problems without their test cases
    pub async fn list(pool: &PgPool) -> AppResult<Vec<ProblemSummary>> {
        let problems = sqlx::query_as::<_, ProblemSummary>(
            r#"
            SELECT id, title, description, difficulty, time_limit_ms, memory_limit_mb,
                   template_code, constraints, tags, created_at
            FROM coding_problems
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// Return which of the given ids exist
    pub async fn existing_ids(pool: &PgPool, ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        let found: Vec<Uuid> =
            sqlx::query_scalar(r#"SELECT id FROM coding_problems WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(pool)
                .await?;

        Ok(found)
    }
}
