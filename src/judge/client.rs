//! HTTP transport to the Judge0 API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::JudgeConfig;

use super::types::{ExecutionRequest, ExecutionResult, SubmissionToken};

/// Judge transport and decoding failures
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("judge request failed: {0}")]
    Transport(String),

    #[error("judge returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid judge payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for JudgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            JudgeError::Decode(err.to_string())
        } else {
            JudgeError::Transport(err.to_string())
        }
    }
}

/// Submit-then-fetch access to a code judge
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Queue a submission and return its token
    async fn submit(&self, request: &ExecutionRequest) -> Result<String, JudgeError>;

    /// Fetch the current state of a queued submission
    async fn fetch(&self, token: &str) -> Result<ExecutionResult, JudgeError>;
}

/// Judge0 client authenticated with RapidAPI headers
pub struct Judge0Client {
    client: Client,
    base_url: String,
    api_key: String,
    api_host: String,
}

impl Judge0Client {
    /// Build a client with an explicit per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_host: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, JudgeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_host: api_host.into(),
        })
    }

    pub fn from_config(config: &JudgeConfig) -> Result<Self, JudgeError> {
        Self::new(
            config.base_url.as_str(),
            config.api_key.as_str(),
            config.api_host.as_str(),
            config.request_timeout,
        )
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
    }
}

#[async_trait]
impl JudgeClient for Judge0Client {
    async fn submit(&self, request: &ExecutionRequest) -> Result<String, JudgeError> {
        let url = format!("{}/submissions?base64_encoded=false&wait=false", self.base_url);
        let response = self
            .authed(self.client.post(url))
            .json(request)
            .send()
            .await?;

        let token: SubmissionToken = decode(response).await?;
        tracing::debug!(token = %token.token, language_id = request.language_id, "Submitted to judge");
        Ok(token.token)
    }

    async fn fetch(&self, token: &str) -> Result<ExecutionResult, JudgeError> {
        let url = format!(
            "{}/submissions/{}?base64_encoded=false&fields=stdout,stderr,compile_output,time,memory,status",
            self.base_url, token
        );
        let response = self.authed(self.client.get(url)).send().await?;
        decode(response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, JudgeError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(JudgeError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    serde_json::from_slice(&body).map_err(|e| JudgeError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = Judge0Client::new(
            "https://judge.example.com/",
            "key",
            "judge.example.com",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://judge.example.com");
    }

    #[test]
    fn test_request_serializes_limits_only_when_set() {
        let request = ExecutionRequest {
            source_code: "print(1)".to_string(),
            language_id: 71,
            stdin: String::new(),
            cpu_time_limit: None,
            memory_limit: Some(262144),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("cpu_time_limit").is_none());
        assert_eq!(value["memory_limit"], 262144);
    }
}
