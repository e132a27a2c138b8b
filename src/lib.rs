//! PrepHire - Mock Assessment and Job Platform Backend
//!
//! This library provides the core functionality for the PrepHire platform,
//! where candidates practise for hiring and companies run their pipeline.
//!
//! # Features
//!
//! - Candidate and company accounts with bearer-token authentication
//! - Multiple-choice tests with scoring and stored results
//! - Coding problems judged by an external Judge0 service
//! - Job postings, applications, assessment assignments and placement tracking
//! - Resume, photo and logo uploads
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs
//! - **Judge**: Judge0 adapter with an explicit polling policy
//! - **Client**: Session store and typed API client for front ends

pub mod client;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware as axum_middleware, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the full application router.
///
/// Layers run outside-in: CORS, tracing, compression, request logging,
/// rate limiting, then the body limit for uploads.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes(state.clone()))
        .layer(DefaultBodyLimit::max(state.config().uploads.max_bytes))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{
        judge::{client::MockJudgeClient, testing},
        models::Role,
        services::AuthService,
        test_utils::lazy_state,
    };

    fn idle_judge() -> judge::Judge {
        testing::judge_with(MockJudgeClient::new(), 1)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = create_router(lazy_state(idle_judge()));

        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_private_routes_require_token() {
        for (method, uri) in [
            (Method::GET, "/api/profile"),
            (Method::GET, "/api/results"),
            (Method::GET, "/api/auth/me"),
            (Method::GET, "/api/company/stats"),
            (Method::GET, "/api/jobs/applications/me"),
            (Method::GET, "/api/coding-problems"),
        ] {
            let app = create_router(lazy_state(idle_judge()));
            let response = app
                .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        }
    }

    #[tokio::test]
    async fn test_forged_token_rejected() {
        let mut other = config::test_config().jwt;
        other.secret = "some-other-secret".to_string();
        let forged = AuthService::issue_token(&uuid::Uuid::new_v4(), Role::Candidate, &other).unwrap();

        let app = create_router(lazy_state(idle_judge()));
        let response = app
            .oneshot(
                Request::get("/api/results")
                    .header(header::AUTHORIZATION, format!("Bearer {forged}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_company_registration_without_details_rejected() {
        let app = create_router(lazy_state(idle_judge()));
        let payload = serde_json::json!({
            "name": "Acme HR",
            "email": "hr@acme.io",
            "password": "secret1",
            "role": "company"
        });

        let response = app
            .oneshot(
                Request::post("/api/auth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_execute_runs_code_through_judge() {
        let mut client = MockJudgeClient::new();
        client
            .expect_submit()
            .withf(|req| req.language_id == judge::Language::Javascript.judge_id() && req.stdin == "5")
            .returning(|_| Ok("tok".to_string()));
        client
            .expect_fetch()
            .returning(|_| Ok(testing::finished("25\n")));

        let app = create_router(lazy_state(testing::judge_with(client, 3)));
        let payload = serde_json::json!({ "code": "console.log(5*5)", "language": "cobol", "input": "5" });

        let response = app
            .oneshot(
                Request::post("/api/execute")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["output"], "25\n");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_router(lazy_state(idle_judge()));
        let response = app
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
