//! Test and result repositories

use sqlx::{types::Json, PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{GradedTest, Question, Test, TestResult},
};

/// Repository for multiple-choice tests
pub struct TestRepository;

impl TestRepository {
    /// Create a test
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        duration_minutes: i32,
        questions: &[Question],
    ) -> AppResult<Test> {
        let test = sqlx::query_as::<_, Test>(
            r#"
            INSERT INTO tests (title, description, duration_minutes, questions)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(duration_minutes)
        .bind(Json(questions))
        .fetch_one(pool)
        .await?;

        Ok(test)
    }

    /// Find test by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Test>> {
        let test = sqlx::query_as::<_, Test>(r#"SELECT * FROM tests WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(test)
    }

    /// Find test by title (used by the seed tool)
    pub async fn find_by_title(pool: &PgPool, title: &str) -> AppResult<Option<Test>> {
        let test = sqlx::query_as::<_, Test>(r#"SELECT * FROM tests WHERE title = $1"#)
            .bind(title)
            .fetch_optional(pool)
            .await?;

        Ok(test)
    }

    /// All tests, newest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Test>> {
        let tests = sqlx::query_as::<_, Test>(r#"SELECT * FROM tests ORDER BY created_at DESC"#)
            .fetch_all(pool)
            .await?;

        Ok(tests)
    }

    /// Return which of the given ids exist
    pub async fn existing_ids(pool: &PgPool, ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        let found: Vec<Uuid> = sqlx::query_scalar(r#"SELECT id FROM tests WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        Ok(found)
    }
}

/// Repository for persisted test attempts
pub struct ResultRepository;

impl ResultRepository {
    /// Persist one graded attempt
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
        test_id: &Uuid,
        graded: &GradedTest,
    ) -> AppResult<TestResult> {
        let result = sqlx::query_as::<_, TestResult>(
            r#"
            INSERT INTO results (user_id, test_id, test_title, score, total_questions, breakdown)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(test_id)
        .bind(&graded.test_title)
        .bind(graded.score)
        .bind(graded.total_questions)
        .bind(Json(&graded.breakdown))
        .fetch_one(executor)
        .await?;

        Ok(result)
    }

    /// A user's attempts, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<TestResult>> {
        let results = sqlx::query_as::<_, TestResult>(
            r#"SELECT * FROM results WHERE user_id = $1 ORDER BY created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(results)
    }
}
