//! Coding problem service: sample views, judged runs and free-form execution

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ApplicationRepository, CodingProblemRepository, ProblemFields, UserRepository},
    error::{AppError, AppResult},
    judge::{ExecutionRequest, ExecutionResult, Judge, JudgeOutcome, Language},
    models::{CaseResult, CodingProblem, EvaluationReport, ProblemSummary, TestCase},
};

/// Status reported for a case whose judge call failed
const RUNTIME_ERROR_STATUS: &str = "Runtime Error";

/// Output of `/execute` when the program printed nothing
const NO_OUTPUT: &str = "No output";

/// Which cases a run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    /// Visible cases only, nothing persisted
    Preview,
    /// Every case; a full pass is recorded
    Final,
}

impl EvaluationMode {
    fn includes(self, case: &TestCase) -> bool {
        match self {
            Self::Preview => !case.is_hidden,
            Self::Final => true,
        }
    }
}

/// Coding problem service
pub struct CodingService;

impl CodingService {
    /// All problems without test cases
    pub async fn list(pool: &PgPool) -> AppResult<Vec<ProblemSummary>> {
        CodingProblemRepository::list(pool).await
    }

    /// A problem with only its visible test cases
    pub async fn get_sample(pool: &PgPool, id: &Uuid) -> AppResult<CodingProblem> {
        let problem = Self::find(pool, id).await?;
        Ok(problem.with_visible_cases())
    }

    /// Create a problem
    pub async fn create(pool: &PgPool, fields: &ProblemFields<'_>) -> AppResult<CodingProblem> {
        let problem = CodingProblemRepository::create(pool, fields).await?;
        tracing::info!(problem_id = %problem.id, title = %problem.title, "Coding problem created");
        Ok(problem)
    }

    /// Run code against the visible cases only
    pub async fn run_samples(
        pool: &PgPool,
        judge: &Judge,
        problem_id: &Uuid,
        code: &str,
        language: &str,
    ) -> AppResult<EvaluationReport> {
        let language = parse_language(language)?;
        let problem = Self::find(pool, problem_id).await?;
        Ok(evaluate(judge, &problem, code, language, EvaluationMode::Preview).await)
    }

    /// Run code against every case and record a full pass
    pub async fn submit(
        pool: &PgPool,
        judge: &Judge,
        user_id: &Uuid,
        problem_id: &Uuid,
        code: &str,
        language: &str,
    ) -> AppResult<EvaluationReport> {
        let language = parse_language(language)?;
        let problem = Self::find(pool, problem_id).await?;

        let report = evaluate(judge, &problem, code, language, EvaluationMode::Final).await;

        if report.success {
            let score = report.passed_count() as i32;

            let mut tx = pool.begin().await?;
            UserRepository::add_solved_problem(&mut *tx, user_id, problem_id).await?;
            UserRepository::add_code_submission(&mut *tx, user_id, problem_id, code, language.as_str())
                .await?;
            ApplicationRepository::complete_problem_assignments(&mut *tx, user_id, problem_id, score)
                .await?;
            tx.commit().await?;

            tracing::info!(user_id = %user_id, problem_id = %problem_id, "Problem solved");
        } else {
            tracing::debug!(
                user_id = %user_id,
                problem_id = %problem_id,
                passed = report.passed_count(),
                total = report.results.len(),
                "Submission did not pass"
            );
        }

        Ok(report)
    }

    /// Run free-form code once; unknown languages fall back to JavaScript
    pub async fn execute(judge: &Judge, code: &str, language: Option<&str>, input: &str) -> AppResult<String> {
        let language = language
            .and_then(|l| l.parse::<Language>().ok())
            .unwrap_or(Language::Javascript);

        let request = ExecutionRequest {
            source_code: code.to_string(),
            language_id: language.judge_id(),
            stdin: input.to_string(),
            cpu_time_limit: None,
            memory_limit: None,
        };

        let outcome = judge.run(&request).await?;
        Ok(format_execution_output(&outcome.result))
    }

    async fn find(pool: &PgPool, id: &Uuid) -> AppResult<CodingProblem> {
        CodingProblemRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Problem"))
    }
}

fn parse_language(language: &str) -> AppResult<Language> {
    language
        .parse()
        .map_err(|e: crate::judge::UnsupportedLanguage| AppError::InvalidInput(e.to_string()))
}

/// Run `code` against the cases selected by `mode`, one after another.
///
/// A judge failure fails only the case it happened on. The returned report
/// has hidden cases redacted.
pub async fn evaluate(
    judge: &Judge,
    problem: &CodingProblem,
    code: &str,
    language: Language,
    mode: EvaluationMode,
) -> EvaluationReport {
    let mut results = Vec::new();

    for case in problem.test_cases.0.iter().filter(|c| mode.includes(c)) {
        let request = ExecutionRequest {
            source_code: code.to_string(),
            language_id: language.judge_id(),
            stdin: case.input.clone(),
            cpu_time_limit: Some(problem.cpu_time_limit_secs()),
            memory_limit: Some(problem.memory_limit_kb()),
        };

        let result = match judge.run(&request).await {
            Ok(outcome) => judged_case(case, outcome),
            Err(e) => {
                tracing::warn!(problem_id = %problem.id, error = %e, "Judge call failed for test case");
                CaseResult {
                    passed: false,
                    status: RUNTIME_ERROR_STATUS.to_string(),
                    input: case.input.clone(),
                    expected_output: case.expected_output.clone(),
                    actual_output: None,
                    time: None,
                    memory: None,
                    error: Some(e.to_string()),
                    hidden: case.is_hidden,
                }
            }
        };
        results.push(result);
    }

    EvaluationReport::from_results(results)
}

fn judged_case(case: &TestCase, outcome: JudgeOutcome) -> CaseResult {
    let JudgeOutcome { result, timed_out } = outcome;
    let passed = !timed_out
        && result.status.is_accepted()
        && outputs_match(result.stdout.as_deref(), &case.expected_output);

    CaseResult {
        passed,
        status: result.status.description.clone(),
        input: case.input.clone(),
        expected_output: case.expected_output.clone(),
        actual_output: result.primary_output().map(str::to_string),
        time: result.time,
        memory: result.memory,
        error: timed_out.then(|| "Judge did not finish in time".to_string()),
        hidden: case.is_hidden,
    }
}

/// Both sides are trimmed of surrounding whitespace, then compared exactly
pub fn outputs_match(actual: Option<&str>, expected: &str) -> bool {
    actual.unwrap_or_default().trim() == expected.trim()
}

/// Render a judge result the way `/execute` reports it
pub fn format_execution_output(result: &ExecutionResult) -> String {
    if result.status.is_error() {
        let detail = [&result.stderr, &result.compile_output]
            .into_iter()
            .filter_map(|o| o.as_deref())
            .find(|o| !o.is_empty())
            .unwrap_or_default();
        return format!("Error: {}\n{}", result.status.description, detail);
    }

    result.primary_output().unwrap_or(NO_OUTPUT).to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use sqlx::types::Json;

    use super::*;
    use crate::constants::{judge_status::TIME_LIMIT_EXCEEDED, HIDDEN_PLACEHOLDER};
    use crate::judge::client::MockJudgeClient;
    use crate::judge::testing::{finished, judge_with, with_status};
    use crate::judge::{JudgeError, JudgeStatus};
    use crate::models::Difficulty;

    fn case(input: &str, expected: &str, hidden: bool) -> TestCase {
        TestCase {
            input: input.to_string(),
            expected_output: expected.to_string(),
            is_hidden: hidden,
        }
    }

    fn two_sum() -> CodingProblem {
        CodingProblem {
            id: Uuid::new_v4(),
            title: "Two Sum".to_string(),
            description: "Return indices of the two numbers adding up to target".to_string(),
            difficulty: Difficulty::Easy,
            time_limit_ms: 2000,
            memory_limit_mb: 256,
            test_cases: Json(vec![
                case("[2,7,11,15]\n9", "[0,1]", false),
                case("[3,2,4]\n6", "[1,2]", false),
                case("[3,3]\n6", "[0,1]", false),
                case("[1,5,3,7,2,8]\n10", "[2,5]", true),
            ]),
            template_code: Json(vec![]),
            constraints: None,
            tags: vec!["arrays".to_string()],
            created_at: Utc::now(),
        }
    }

    /// Judge whose submissions echo a fixed stdout per input
    fn judge_answering(answers: HashMap<&'static str, &'static str>) -> Judge {
        let mut client = MockJudgeClient::new();
        client
            .expect_submit()
            .returning(|request| Ok(request.stdin.clone()));
        client
            .expect_fetch()
            .returning(move |token| Ok(finished(answers.get(token).copied().unwrap_or(""))));
        judge_with(client, 3)
    }

    fn solution_answers() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("[2,7,11,15]\n9", "[0,1]\n"),
            ("[3,2,4]\n6", "[1,2]\n"),
            ("[3,3]\n6", "[0,1]\n"),
            ("[1,5,3,7,2,8]\n10", "[2,5]\n"),
        ])
    }

    #[test]
    fn test_outputs_match_trims_both_sides() {
        assert!(outputs_match(Some("[0,1]\n"), "[0,1]"));
        assert!(outputs_match(Some("  42  "), "\n42\n"));
        assert!(!outputs_match(Some("[0, 1]"), "[0,1]"));
        assert!(!outputs_match(None, "[0,1]"));
        assert!(outputs_match(None, "  "));
    }

    #[tokio::test]
    async fn test_two_sum_hidden_failure_flips_success() {
        let mut answers = solution_answers();
        answers.insert("[1,5,3,7,2,8]\n10", "[1,5]\n");
        let judge = judge_answering(answers);

        let report = evaluate(&judge, &two_sum(), "code", Language::Python, EvaluationMode::Final).await;

        assert!(!report.success);
        assert_eq!(report.results.len(), 4);
        assert!(report.results[..3].iter().all(|r| r.passed));

        let visible = &report.results[0];
        assert_eq!(visible.input, "[2,7,11,15]\n9");
        assert_eq!(visible.expected_output, "[0,1]");

        let hidden = &report.results[3];
        assert!(!hidden.passed);
        assert!(hidden.hidden);
        assert_eq!(hidden.input, HIDDEN_PLACEHOLDER);
        assert_eq!(hidden.expected_output, HIDDEN_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_hidden_cases_are_redacted_when_passing() {
        let judge = judge_answering(solution_answers());

        let report = evaluate(&judge, &two_sum(), "code", Language::Python, EvaluationMode::Final).await;

        assert!(report.success);
        assert_eq!(report.passed_count(), 4);
        let serialized = serde_json::to_string(&report).unwrap();
        assert!(!serialized.contains("[1,5,3,7,2,8]"));
    }

    #[tokio::test]
    async fn test_preview_runs_visible_cases_only() {
        let judge = judge_answering(solution_answers());

        let report = evaluate(&judge, &two_sum(), "code", Language::Python, EvaluationMode::Preview).await;

        assert!(report.success);
        assert_eq!(report.results.len(), 3);
        assert!(report.results.iter().all(|r| !r.hidden));
    }

    #[tokio::test]
    async fn test_judge_error_fails_only_that_case() {
        let mut client = MockJudgeClient::new();
        client.expect_submit().returning(|request| {
            if request.stdin == "[3,2,4]\n6" {
                Err(JudgeError::Status {
                    status: 429,
                    body: "quota".to_string(),
                })
            } else {
                Ok(request.stdin.clone())
            }
        });
        let answers = solution_answers();
        client
            .expect_fetch()
            .returning(move |token| Ok(finished(answers.get(token).copied().unwrap_or(""))));
        let judge = judge_with(client, 3);

        let report = evaluate(&judge, &two_sum(), "code", Language::Python, EvaluationMode::Final).await;

        assert!(!report.success);
        assert_eq!(report.results.len(), 4);
        assert_eq!(report.passed_count(), 3);
        let failed = &report.results[1];
        assert_eq!(failed.status, RUNTIME_ERROR_STATUS);
        assert!(failed.error.as_deref().unwrap_or_default().contains("429"));
    }

    #[tokio::test]
    async fn test_timed_out_case_does_not_pass() {
        let mut client = MockJudgeClient::new();
        client.expect_submit().returning(|_| Ok("t".to_string()));
        client.expect_fetch().returning(|_| {
            let mut pending = with_status(2, "Processing");
            pending.stdout = Some("[0,1]".to_string());
            Ok(pending)
        });
        let judge = judge_with(client, 2);

        let mut problem = two_sum();
        problem.test_cases.0.truncate(1);
        let report = evaluate(&judge, &problem, "code", Language::Python, EvaluationMode::Final).await;

        assert!(!report.success);
        assert!(report.results[0].error.is_some());
    }

    /// Judge that prints the right answer for every case but ends with `status`
    fn judge_ending_with(id: i32, description: &'static str) -> Judge {
        let mut client = MockJudgeClient::new();
        client.expect_submit().returning(|request| Ok(request.stdin.clone()));
        let answers = solution_answers();
        client.expect_fetch().returning(move |token| {
            let mut result = with_status(id, description);
            result.stdout = answers.get(token).map(|s| s.to_string());
            Ok(result)
        });
        judge_with(client, 3)
    }

    #[tokio::test]
    async fn test_matching_output_over_time_limit_does_not_pass() {
        let judge = judge_ending_with(TIME_LIMIT_EXCEEDED, "Time Limit Exceeded");

        let report = evaluate(&judge, &two_sum(), "code", Language::Python, EvaluationMode::Final).await;

        assert!(!report.success);
        assert_eq!(report.passed_count(), 0);
        assert_eq!(report.results[0].status, "Time Limit Exceeded");
    }

    #[tokio::test]
    async fn test_matching_output_with_runtime_error_does_not_pass() {
        let judge = judge_ending_with(11, "Runtime Error (NZEC)");

        let report = evaluate(&judge, &two_sum(), "code", Language::Python, EvaluationMode::Preview).await;

        assert!(!report.success);
        assert!(report.results.iter().all(|r| !r.passed));
    }

    #[tokio::test]
    async fn test_problem_without_cases_is_not_success() {
        let mut client = MockJudgeClient::new();
        client.expect_submit().never();
        let judge = judge_with(client, 1);

        let mut problem = two_sum();
        problem.test_cases.0.clear();
        let report = evaluate(&judge, &problem, "code", Language::Python, EvaluationMode::Final).await;

        assert!(!report.success);
        assert!(report.results.is_empty());
    }

    #[tokio::test]
    async fn test_limits_are_passed_to_the_judge() {
        let mut client = MockJudgeClient::new();
        client
            .expect_submit()
            .withf(|r| r.cpu_time_limit == Some(2.0) && r.memory_limit == Some(262_144) && r.language_id == 71)
            .returning(|_| Ok("t".to_string()));
        client.expect_fetch().returning(|_| Ok(finished("[0,1]")));
        let judge = judge_with(client, 1);

        let mut problem = two_sum();
        problem.test_cases.0.truncate(1);
        let report = evaluate(&judge, &problem, "code", Language::Python, EvaluationMode::Final).await;
        assert!(report.success);
    }

    #[tokio::test]
    async fn test_execute_falls_back_to_javascript() {
        let mut client = MockJudgeClient::new();
        client
            .expect_submit()
            .withf(|r| r.language_id == 63 && r.stdin == "5" && r.cpu_time_limit.is_none())
            .returning(|_| Ok("t".to_string()));
        client.expect_fetch().returning(|_| Ok(finished("25\n")));
        let judge = judge_with(client, 1);

        let output = CodingService::execute(&judge, "code", Some("cobol"), "5").await.unwrap();
        assert_eq!(output, "25\n");
    }

    #[test]
    fn test_execution_output_formatting() {
        let empty = finished("");
        assert_eq!(format_execution_output(&empty), NO_OUTPUT);

        let compile_error = ExecutionResult {
            compile_output: Some("main.cpp:1: error".to_string()),
            status: JudgeStatus {
                id: 6,
                description: "Compilation Error".to_string(),
            },
            ..Default::default()
        };
        assert_eq!(
            format_execution_output(&compile_error),
            "Error: Compilation Error\nmain.cpp:1: error"
        );

        let runtime_error = ExecutionResult {
            stdout: Some("partial".to_string()),
            stderr: Some("ZeroDivisionError".to_string()),
            status: JudgeStatus {
                id: 11,
                description: "Runtime Error (NZEC)".to_string(),
            },
            ..Default::default()
        };
        assert_eq!(
            format_execution_output(&runtime_error),
            "Error: Runtime Error (NZEC)\nZeroDivisionError"
        );
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_repeat_solve_keeps_solved_set_unique() {
        let pool = crate::test_utils::test_pool().await;
        let candidate = crate::test_utils::create_user(&pool, crate::models::Role::Candidate).await;
        let template = two_sum();
        let title = format!("Two Sum {}", Uuid::new_v4());
        let problem = CodingService::create(
            &pool,
            &ProblemFields {
                title: &title,
                description: &template.description,
                difficulty: template.difficulty,
                time_limit_ms: template.time_limit_ms,
                memory_limit_mb: template.memory_limit_mb,
                test_cases: &template.test_cases.0,
                template_code: &[],
                constraints: None,
                tags: &template.tags,
            },
        )
        .await
        .unwrap();
        let judge = judge_answering(solution_answers());

        for _ in 0..2 {
            let report = CodingService::submit(&pool, &judge, &candidate.id, &problem.id, "code", "python")
                .await
                .unwrap();
            assert!(report.success);
        }

        let user = UserRepository::find_by_id(&pool, &candidate.id).await.unwrap().unwrap();
        assert_eq!(user.solved_problems, vec![problem.id]);

        let submissions: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM code_submissions WHERE user_id = $1 AND problem_id = $2",
        )
        .bind(candidate.id)
        .bind(problem.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(submissions, 2);
    }
}
