//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    db::repositories::{CompanyFields, CompanyRepository, UserRepository},
    error::{AppError, AppResult},
    models::{Company, Role, User},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user.
    ///
    /// Company accounts must come with company details; the user and the
    /// company row are written in one transaction.
    pub async fn register(
        pool: &PgPool,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        company: Option<CompanyFields<'_>>,
    ) -> AppResult<(User, Option<Company>)> {
        if role == Role::Company && company.is_none() {
            return Err(AppError::InvalidInput(
                "Company details (companyName, industry, location) are required".to_string(),
            ));
        }

        let password_hash = Self::hash_password(password)?;

        let mut tx = pool.begin().await?;

        if UserRepository::email_exists(&mut *tx, email).await? {
            return Err(AppError::AlreadyExists("User already exists".to_string()));
        }

        let user = UserRepository::create(&mut *tx, name, email, &password_hash, role).await?;

        let company = match (role, company) {
            (Role::Company, Some(fields)) => {
                Some(CompanyRepository::create(&mut *tx, &user.id, &fields).await?)
            }
            _ => None,
        };

        tx.commit().await?;

        tracing::info!(user_id = %user.id, role = %role, "User registered");
        Ok((user, company))
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        config: &JwtConfig,
        email: &str,
        password: &str,
    ) -> AppResult<(User, Option<Company>, String)> {
        let user = UserRepository::find_by_email(pool, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let company = if user.is_company() {
            CompanyRepository::find_by_user(pool, &user.id).await?
        } else {
            None
        };

        let token = Self::issue_token(&user.id, user.role, config)?;

        Ok((user, company, token))
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(pool, user_id).await
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Sign an access token for a user
    pub fn issue_token(user_id: &Uuid, role: Role, config: &JwtConfig) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.expiry_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
