//! User model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account role, stored as the `user_role` enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Candidate,
    Company,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column list for [`User`]; file blobs are never loaded with the user row
pub const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, role,
    college, degree, graduation_year, skills, bio, phone_number, linked_in, github,
    photo_data IS NOT NULL AS has_photo,
    resume_data IS NOT NULL AS has_resume,
    solved_problems, created_at, updated_at
"#;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[sqlx(flatten)]
    pub profile: Profile,
    pub solved_problems: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate profile fields
#[derive(Debug, Clone, Default, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub college: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i32>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub linked_in: Option<String>,
    pub github: Option<String>,
    pub has_photo: bool,
    pub has_resume: bool,
}

impl User {
    pub fn is_company(&self) -> bool {
        self.role == Role::Company
    }
}

/// Code accepted for a problem, appended after a fully passing submission
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSubmission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub code: String,
    pub language: String,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Company).unwrap(), "\"company\"");
        let role: Role = serde_json::from_str("\"candidate\"").unwrap();
        assert_eq!(role, Role::Candidate);
        assert_eq!(Role::default(), Role::Candidate);
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::Candidate,
            profile: Profile::default(),
            solved_problems: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["profile"]["hasPhoto"], false);
    }
}
