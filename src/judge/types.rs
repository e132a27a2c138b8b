//! Judge0 wire types

use serde::{Deserialize, Serialize};

use crate::constants::judge_status;

/// Body of `POST /submissions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionRequest {
    pub source_code: String,
    pub language_id: i32,
    pub stdin: String,
    /// CPU time limit in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_time_limit: Option<f64>,
    /// Memory limit in kilobytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<i64>,
}

/// Response of `POST /submissions`
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionToken {
    pub token: String,
}

/// Judge0 status object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeStatus {
    pub id: i32,
    #[serde(default)]
    pub description: String,
}

impl JudgeStatus {
    /// Still queued or running
    pub fn is_pending(&self) -> bool {
        matches!(self.id, judge_status::IN_QUEUE | judge_status::PROCESSING)
    }

    /// Ran to completion within the limits
    pub fn is_accepted(&self) -> bool {
        self.id == judge_status::ACCEPTED
    }

    /// Compilation error, runtime error or judge-side failure
    pub fn is_error(&self) -> bool {
        self.id >= judge_status::COMPILATION_ERROR
    }
}

impl Default for JudgeStatus {
    fn default() -> Self {
        Self {
            id: judge_status::IN_QUEUE,
            description: "In Queue".to_string(),
        }
    }
}

/// Response of `GET /submissions/{token}`, normalized
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ExecutionResult {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    /// Wall time in seconds, as reported by the judge
    #[serde(default)]
    pub time: Option<String>,
    /// Peak memory in kilobytes
    #[serde(default)]
    pub memory: Option<i64>,
    #[serde(default)]
    pub status: JudgeStatus,
}

impl ExecutionResult {
    /// First non-empty of stdout, stderr, compile output
    pub fn primary_output(&self) -> Option<&str> {
        [&self.stdout, &self.stderr, &self.compile_output]
            .into_iter()
            .filter_map(|o| o.as_deref())
            .find(|o| !o.is_empty())
    }
}

/// Result of running one request to completion (or to the poll ceiling)
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeOutcome {
    pub result: ExecutionResult,
    /// Poll attempts ran out while the judge still reported a pending status
    pub timed_out: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_judge_payload() {
        let raw = r#"{
            "stdout": "[0,1]\n",
            "stderr": null,
            "compile_output": null,
            "time": "0.041",
            "memory": 9408,
            "status": {"id": 3, "description": "Accepted"}
        }"#;
        let result: ExecutionResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.stdout.as_deref(), Some("[0,1]\n"));
        assert_eq!(result.status.id, judge_status::ACCEPTED);
        assert!(!result.status.is_pending());
        assert!(!result.status.is_error());
    }

    #[test]
    fn test_missing_status_is_pending() {
        let result: ExecutionResult = serde_json::from_str("{}").unwrap();
        assert!(result.status.is_pending());
    }

    #[test]
    fn test_primary_output_order() {
        let result = ExecutionResult {
            stdout: Some(String::new()),
            stderr: Some("boom".to_string()),
            compile_output: Some("ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(result.primary_output(), Some("boom"));
    }
}
