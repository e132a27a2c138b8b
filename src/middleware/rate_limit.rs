//! Rate limiting middleware using Redis.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use deadpool_redis::Pool;
use std::net::SocketAddr;

use crate::{constants::rate_limits, error::AppError, state::AppState};

/// Counter state after one request
#[derive(Debug)]
pub struct RateLimitInfo {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
    pub allowed: bool,
}

/// Rate limit tier for different operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitTier {
    /// Login and registration
    Auth,
    /// Anything that reaches the external judge
    Judge,
    General,
}

impl RateLimitTier {
    /// Classify a request path
    pub fn for_path(path: &str) -> Self {
        let path = path.strip_prefix(crate::constants::API_BASE_PATH).unwrap_or(path);

        if path.starts_with("/auth/login") || path.starts_with("/auth/register") {
            return Self::Auth;
        }
        if path == "/execute" {
            return Self::Judge;
        }
        if let Some(rest) = path.strip_prefix("/coding-problems/") {
            if rest.ends_with("/test") || rest.ends_with("/submit") {
                return Self::Judge;
            }
        }
        Self::General
    }

    fn key_prefix(self) -> &'static str {
        match self {
            Self::Auth => "rl:auth",
            Self::Judge => "rl:judge",
            Self::General => "rl:api",
        }
    }

    /// `(max requests, window seconds)`
    fn limits(self) -> (u64, u64) {
        match self {
            Self::Auth => (rate_limits::AUTH_MAX_REQUESTS, rate_limits::AUTH_WINDOW_SECS),
            Self::Judge => (rate_limits::JUDGE_MAX_REQUESTS, rate_limits::JUDGE_WINDOW_SECS),
            Self::General => (rate_limits::GENERAL_MAX_REQUESTS, rate_limits::GENERAL_WINDOW_SECS),
        }
    }
}

/// Check rate limit using Redis INCR + EXPIRE pattern
pub async fn check_rate_limit(
    pool: &Pool,
    key: &str,
    limit: u64,
    window_secs: u64,
) -> Result<RateLimitInfo, AppError> {
    let mut conn = pool.get().await?;

    let count: u64 = redis::cmd("INCR").arg(key).query_async(&mut conn).await?;

    // First hit opens the window
    if count == 1 {
        redis::cmd("EXPIRE")
            .arg(key)
            .arg(window_secs)
            .query_async::<()>(&mut conn)
            .await?;
    }

    let ttl: i64 = redis::cmd("TTL").arg(key).query_async(&mut conn).await?;

    Ok(RateLimitInfo {
        limit,
        remaining: limit.saturating_sub(count),
        reset: u64::try_from(ttl).unwrap_or(0),
        allowed: count <= limit,
    })
}

fn add_rate_limit_headers(response: &mut Response, info: &RateLimitInfo) {
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(info.limit));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(info.remaining));
    headers.insert("X-RateLimit-Reset", HeaderValue::from(info.reset));
}

fn rate_limit_response(info: &RateLimitInfo) -> Response {
    let mut response = AppError::TooManyRequests.into_response();
    add_rate_limit_headers(&mut response, info);
    response
        .headers_mut()
        .insert("Retry-After", HeaderValue::from(info.reset));
    response
}

/// Client IP, from the socket or the first `X-Forwarded-For` hop
fn client_ip(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .or_else(|| {
            request
                .headers()
                .get("X-Forwarded-For")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.split(',').next())
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Per-IP fixed-window limiter. Requests pass through when Redis is unavailable.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let tier = RateLimitTier::for_path(request.uri().path());
    let (limit, window) = tier.limits();
    let key = format!("{}:{}", tier.key_prefix(), client_ip(&request));

    match check_rate_limit(state.redis(), &key, limit, window).await {
        Ok(info) if !info.allowed => {
            tracing::warn!(key = %key, "Rate limit exceeded");
            rate_limit_response(&info)
        }
        Ok(info) => {
            let mut response = next.run(request).await;
            add_rate_limit_headers(&mut response, &info);
            response
        }
        Err(e) => {
            tracing::error!("Rate limit check failed: {:?}", e);
            next.run(request).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_classification() {
        assert_eq!(RateLimitTier::for_path("/api/auth/login"), RateLimitTier::Auth);
        assert_eq!(RateLimitTier::for_path("/api/auth/register"), RateLimitTier::Auth);
        assert_eq!(RateLimitTier::for_path("/api/auth/me"), RateLimitTier::General);
        assert_eq!(RateLimitTier::for_path("/api/execute"), RateLimitTier::Judge);
        assert_eq!(
            RateLimitTier::for_path("/api/coding-problems/7f1c/submit"),
            RateLimitTier::Judge
        );
        assert_eq!(
            RateLimitTier::for_path("/api/coding-problems/7f1c/test"),
            RateLimitTier::Judge
        );
        assert_eq!(RateLimitTier::for_path("/api/coding-problems"), RateLimitTier::General);
        assert_eq!(RateLimitTier::for_path("/api/jobs"), RateLimitTier::General);
    }

    #[test]
    fn test_exceeded_response_carries_headers() {
        let info = RateLimitInfo {
            limit: 10,
            remaining: 0,
            reset: 42,
            allowed: false,
        };
        let response = rate_limit_response(&info);

        assert_eq!(response.status(), axum::http::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["Retry-After"], "42");
        assert_eq!(response.headers()["X-RateLimit-Limit"], "10");
        assert_eq!(response.headers()["X-RateLimit-Remaining"], "0");
    }

    #[test]
    fn test_client_ip_prefers_forwarded_header_without_socket() {
        let request = Request::builder()
            .uri("/api/jobs")
            .header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request), "203.0.113.9");

        let request = Request::builder().uri("/api/jobs").body(Body::empty()).unwrap();
        assert_eq!(client_ip(&request), "unknown");
    }
}
