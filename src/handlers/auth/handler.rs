//! Authentication handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::User,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{LoginRequest, RegisterRequest},
    response::{AuthResponse, RegisterResponse, SessionUserResponse},
};

/// Register a candidate or a company account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    payload.validate()?;

    let email = payload.email();
    let contact_info = payload.contact_info();

    AuthService::register(
        state.db(),
        payload.name.trim(),
        &email,
        &payload.password,
        payload.role,
        payload.company_fields(&contact_info),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
        }),
    ))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (user, company, token) = AuthService::login(
        state.db(),
        &state.config().jwt,
        &payload.email.trim().to_lowercase(),
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse {
        token,
        user: SessionUserResponse::new(user, company),
    }))
}

/// Get current authenticated user
pub async fn me(State(state): State<AppState>, auth_user: AuthenticatedUser) -> AppResult<Json<User>> {
    let user = AuthService::get_user_by_id(state.db(), &auth_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(user))
}
