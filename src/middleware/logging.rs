//! Logging middleware

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    match classify(status) {
        Outcome::ServerError => warn!(
            method = %method, path = %path, status = status.as_u16(), duration_ms = %duration_ms,
            "Request completed with server error"
        ),
        Outcome::ClientError => warn!(
            method = %method, path = %path, status = status.as_u16(), duration_ms = %duration_ms,
            "Request completed with client error"
        ),
        Outcome::Ok => info!(
            method = %method, path = %path, status = status.as_u16(), duration_ms = %duration_ms,
            "Request completed"
        ),
    }

    response
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Ok,
    ClientError,
    ServerError,
}

/// 404s and 401s are routine traffic and logged at info
fn classify(status: StatusCode) -> Outcome {
    if status.is_server_error() {
        Outcome::ServerError
    } else if status.is_client_error()
        && status != StatusCode::NOT_FOUND
        && status != StatusCode::UNAUTHORIZED
    {
        Outcome::ClientError
    } else {
        Outcome::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(StatusCode::OK), Outcome::Ok);
        assert_eq!(classify(StatusCode::NOT_FOUND), Outcome::Ok);
        assert_eq!(classify(StatusCode::UNAUTHORIZED), Outcome::Ok);
        assert_eq!(classify(StatusCode::BAD_REQUEST), Outcome::ClientError);
        assert_eq!(classify(StatusCode::BAD_GATEWAY), Outcome::ServerError);
    }
}
