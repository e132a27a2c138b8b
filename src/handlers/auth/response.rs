//! Authentication response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Company, Role, User};

/// Registration acknowledgement
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Token plus the logged-in user
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUserResponse,
}

/// User as carried in the client session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub company_details: Option<Company>,
}

impl SessionUserResponse {
    pub fn new(user: User, company: Option<Company>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            company_details: company,
        }
    }
}
