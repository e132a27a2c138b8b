//! Multiple-choice test service

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::NO_ANSWER,
    db::repositories::{ApplicationRepository, ResultRepository, TestRepository},
    error::{AppError, AppResult},
    models::{AnswerBreakdown, GradedTest, PublicTest, Question, Test, TestResult},
};

/// Test service
pub struct TestService;

impl TestService {
    /// All tests, without correct answers
    pub async fn list_public(pool: &PgPool) -> AppResult<Vec<PublicTest>> {
        let tests = TestRepository::list(pool).await?;
        Ok(tests.into_iter().map(Test::without_answers).collect())
    }

    /// One test, without correct answers
    pub async fn get_public(pool: &PgPool, id: &Uuid) -> AppResult<PublicTest> {
        let test = TestRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Test"))?;
        Ok(test.without_answers())
    }

    /// Create a test
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        duration_minutes: i32,
        questions: &[Question],
    ) -> AppResult<Test> {
        if let Some(q) = questions.iter().find(|q| !q.options.contains(&q.correct_answer)) {
            return Err(AppError::InvalidInput(format!(
                "Correct answer of \"{}\" is not one of its options",
                q.question_text
            )));
        }

        TestRepository::create(pool, title, description, duration_minutes, questions).await
    }

    /// Grade a submission, persist the attempt and complete matching assignments
    pub async fn submit(
        pool: &PgPool,
        user_id: &Uuid,
        test_id: &Uuid,
        answers: &HashMap<String, String>,
    ) -> AppResult<GradedTest> {
        let test = TestRepository::find_by_id(pool, test_id)
            .await?
            .ok_or_else(|| AppError::not_found("Test"))?;

        let graded = grade(&test, answers);

        let mut tx = pool.begin().await?;
        ResultRepository::create(&mut *tx, user_id, test_id, &graded).await?;
        let completed =
            ApplicationRepository::complete_test_assignments(&mut *tx, user_id, test_id, graded.score)
                .await?;
        tx.commit().await?;

        tracing::info!(
            user_id = %user_id,
            test_id = %test_id,
            score = graded.score,
            total = graded.total_questions,
            assignments_completed = completed,
            "Test submitted"
        );

        Ok(graded)
    }

    /// A user's past attempts, newest first
    pub async fn results_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<TestResult>> {
        ResultRepository::list_for_user(pool, user_id).await
    }
}

/// Score answers against a test by exact string match; unanswered questions
/// are recorded as "No Answer" and count as wrong
pub fn grade(test: &Test, answers: &HashMap<String, String>) -> GradedTest {
    let breakdown: Vec<AnswerBreakdown> = test
        .questions
        .0
        .iter()
        .map(|q| {
            let selected = answers.get(&q.id.to_string());
            AnswerBreakdown {
                question: q.question_text.clone(),
                selected_answer: selected.cloned().unwrap_or_else(|| NO_ANSWER.to_string()),
                correct_answer: q.correct_answer.clone(),
                is_correct: selected.is_some_and(|a| *a == q.correct_answer),
            }
        })
        .collect();

    let score = breakdown.iter().filter(|b| b.is_correct).count();

    GradedTest {
        test_title: test.title.clone(),
        score: score as i32,
        total_questions: breakdown.len() as i32,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sqlx::types::Json;

    use super::*;

    fn question(text: &str, correct: &str) -> Question {
        Question {
            id: Uuid::new_v4(),
            question_text: text.to_string(),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_answer: correct.to_string(),
        }
    }

    fn sample_test() -> Test {
        Test {
            id: Uuid::new_v4(),
            title: "Basics".to_string(),
            description: String::new(),
            duration_minutes: 30,
            questions: Json(vec![question("q1", "A"), question("q2", "B"), question("q3", "C")]),
            created_at: Utc::now(),
        }
    }

    fn answer_all(test: &Test, pick: impl Fn(&Question) -> &str) -> HashMap<String, String> {
        test.questions
            .0
            .iter()
            .map(|q| (q.id.to_string(), pick(q).to_string()))
            .collect()
    }

    #[test]
    fn test_all_correct_scores_full_marks() {
        let test = sample_test();
        let answers = answer_all(&test, |q| q.correct_answer.as_str());

        let graded = grade(&test, &answers);
        assert_eq!(graded.score, 3);
        assert_eq!(graded.total_questions, 3);
        assert!(graded.breakdown.iter().all(|b| b.is_correct));
    }

    #[test]
    fn test_total_is_question_count_regardless_of_answers() {
        let test = sample_test();
        for answers in [
            HashMap::new(),
            answer_all(&test, |_| "C"),
            HashMap::from([("not-a-question".to_string(), "A".to_string())]),
        ] {
            let graded = grade(&test, &answers);
            assert_eq!(graded.total_questions as usize, test.question_count());
            assert_eq!(graded.breakdown.len(), test.question_count());
        }
    }

    #[test]
    fn test_missing_answers_are_recorded_as_no_answer() {
        let test = sample_test();
        let first = test.questions.0[0].id.to_string();
        let answers = HashMap::from([(first, "A".to_string())]);

        let graded = grade(&test, &answers);
        assert_eq!(graded.score, 1);
        assert_eq!(graded.breakdown[1].selected_answer, NO_ANSWER);
        assert!(!graded.breakdown[1].is_correct);
    }

    #[test]
    fn test_comparison_is_exact() {
        let test = sample_test();
        let answers = answer_all(&test, |q| if q.correct_answer == "A" { "a" } else { "A " });

        assert_eq!(grade(&test, &answers).score, 0);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_submission_is_stored_in_results() {
        let pool = crate::test_utils::test_pool().await;
        let candidate = crate::test_utils::create_user(&pool, crate::models::Role::Candidate).await;
        let questions = vec![question("q1", "A"), question("q2", "B")];
        let test = TestService::create(&pool, "Stored", "", 15, &questions).await.unwrap();

        let answers = answer_all(&test, |q| q.correct_answer.as_str());
        let graded = TestService::submit(&pool, &candidate.id, &test.id, &answers).await.unwrap();
        assert_eq!(graded.score, 2);

        let results = TestService::results_for_user(&pool, &candidate.id).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].test_title, "Stored");
        assert_eq!(results[0].total_questions, 2);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_create_rejects_answer_outside_options() {
        let pool = crate::test_utils::test_pool().await;
        let questions = vec![question("q1", "D")];

        let err = TestService::create(&pool, "Broken", "", 15, &questions).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
