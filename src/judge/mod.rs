//! External code judge integration
//!
//! Compilation, sandboxing and resource limiting are all done by a Judge0
//! instance. This module only submits source code, polls for the verdict
//! under a [`RetryPolicy`], and normalizes the result.

pub mod client;
pub mod language;
pub mod retry;
pub mod types;

use std::sync::Arc;

pub use client::{Judge0Client, JudgeClient, JudgeError};
pub use language::{Language, UnsupportedLanguage};
pub use retry::{poll_until, Polled, RetryPolicy, Sleeper, TokioSleeper};
pub use types::{ExecutionRequest, ExecutionResult, JudgeOutcome, JudgeStatus};

use crate::config::JudgeConfig;

/// Judge facade used by the evaluation services
#[derive(Clone)]
pub struct Judge {
    client: Arc<dyn JudgeClient>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl Judge {
    pub fn new(client: Arc<dyn JudgeClient>, sleeper: Arc<dyn Sleeper>, policy: RetryPolicy) -> Self {
        Self {
            client,
            sleeper,
            policy,
        }
    }

    /// Judge0 over HTTP with the configured poll budget
    pub fn from_config(config: &JudgeConfig) -> Result<Self, JudgeError> {
        Ok(Self::new(
            Arc::new(Judge0Client::from_config(config)?),
            Arc::new(TokioSleeper),
            RetryPolicy::fixed(config.poll_attempts, config.poll_interval),
        ))
    }

    /// Submit one request and poll until the judge leaves the pending state.
    ///
    /// When the poll budget runs out the last (still pending) result is
    /// returned with `timed_out` set; its output fields may be incomplete.
    pub async fn run(&self, request: &ExecutionRequest) -> Result<JudgeOutcome, JudgeError> {
        let token = self.client.submit(request).await?;
        let client = self.client.as_ref();
        let token_ref = token.as_str();

        let polled = poll_until(
            &self.policy,
            self.sleeper.as_ref(),
            move || client.fetch(token_ref),
            |result: &ExecutionResult| !result.status.is_pending(),
        )
        .await?;

        let timed_out = polled.is_exhausted();
        if timed_out {
            tracing::warn!(token = %token, "Judge did not finish within the poll budget");
        }

        Ok(JudgeOutcome {
            result: polled.into_inner(),
            timed_out,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers for building a [`Judge`] over a mocked client

    use std::sync::Arc;
    use std::time::Duration;

    use super::client::MockJudgeClient;
    use super::retry::fake::FakeSleeper;
    use super::*;

    pub fn judge_with(client: MockJudgeClient, attempts: u32) -> Judge {
        Judge::new(
            Arc::new(client),
            Arc::new(FakeSleeper::default()),
            RetryPolicy::fixed(attempts, Duration::from_secs(1)),
        )
    }

    pub fn finished(stdout: &str) -> ExecutionResult {
        ExecutionResult {
            stdout: Some(stdout.to_string()),
            time: Some("0.010".to_string()),
            memory: Some(1024),
            status: JudgeStatus {
                id: crate::constants::judge_status::ACCEPTED,
                description: "Accepted".to_string(),
            },
            ..Default::default()
        }
    }

    pub fn with_status(id: i32, description: &str) -> ExecutionResult {
        ExecutionResult {
            status: JudgeStatus {
                id,
                description: description.to_string(),
            },
            ..Default::default()
        }
    }
}
