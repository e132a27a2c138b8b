//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Role, User},
    services::AuthService,
    state::AppState,
};

/// The stored user a valid bearer token resolved to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn require_company(&self) -> Result<(), AppError> {
        match self.role {
            Role::Company => Ok(()),
            Role::Candidate => Err(AppError::Forbidden(
                "Only company accounts can do this".to_string(),
            )),
        }
    }

    pub fn require_candidate(&self) -> Result<(), AppError> {
        match self.role {
            Role::Candidate => Ok(()),
            Role::Company => Err(AppError::Forbidden(
                "Only candidate accounts can do this".to_string(),
            )),
        }
    }
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Handlers taking this extractor are only reachable with a valid token.
///
/// Behind [`auth_middleware`] the user is already in the extensions; on
/// mixed public/private routers the extractor authenticates by itself.
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(&parts.headers, parts.uri.path(), state).await?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), request.uri().path(), &state).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Resolve `Authorization: Bearer <token>` to a stored user
async fn authenticate(headers: &HeaderMap, path: &str, state: &AppState) -> Result<AuthenticatedUser, AppError> {
    let Some(auth_header) = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) else {
        debug!(path = %path, "Auth failed: No Authorization header");
        return Err(AppError::Unauthorized);
    };

    let Some(token) = bearer_token(auth_header) else {
        debug!(path = %path, "Auth failed: Invalid Authorization format (expected 'Bearer <token>')");
        return Err(AppError::Unauthorized);
    };

    let claims = AuthService::verify_token(token, &state.config().jwt.secret).map_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: Token verification failed");
        e
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        debug!(path = %path, sub = %claims.sub, error = ?e, "Auth failed: Invalid user ID in token");
        AppError::InvalidToken
    })?;

    let user = AuthService::get_user_by_id(state.db(), &user_id)
        .await?
        .ok_or_else(|| {
            debug!(path = %path, user_id = %user_id, "Auth failed: Token subject no longer exists");
            AppError::InvalidToken
        })?;

    debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated");
    Ok(user.into())
}

fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
