//! Company model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Headcount bracket, stored as the `company_size` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "company_size")]
pub enum CompanySize {
    #[sqlx(rename = "1-50")]
    #[serde(rename = "1-50")]
    Tiny,
    #[sqlx(rename = "51-200")]
    #[serde(rename = "51-200")]
    Small,
    #[sqlx(rename = "201-500")]
    #[serde(rename = "201-500")]
    Medium,
    #[sqlx(rename = "501-1000")]
    #[serde(rename = "501-1000")]
    Large,
    #[sqlx(rename = "1000+")]
    #[serde(rename = "1000+")]
    Enterprise,
}

/// Column list for [`Company`]; the logo blob is never loaded with the row
pub const COMPANY_COLUMNS: &str = r#"
    id, user_id, company_name, industry, size, location, website, description,
    logo_data IS NOT NULL AS has_logo,
    linked_in, twitter, contact_email, contact_phone, contact_address,
    created_at, updated_at
"#;

/// Company profile owned by one `company` user
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub industry: String,
    pub size: Option<CompanySize>,
    pub location: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub has_logo: bool,
    #[sqlx(flatten)]
    pub social_media: SocialMedia,
    #[sqlx(flatten)]
    pub contact_info: ContactInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct ContactInfo {
    #[sqlx(rename = "contact_email")]
    pub email: Option<String>,
    #[sqlx(rename = "contact_phone")]
    pub phone: Option<String>,
    #[sqlx(rename = "contact_address")]
    pub address: Option<String>,
}

/// Company fields embedded in job listings
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    #[sqlx(rename = "company_id")]
    pub id: Uuid,
    pub company_name: String,
    pub industry: String,
    #[sqlx(rename = "company_location")]
    pub location: String,
    #[sqlx(rename = "company_description")]
    pub description: Option<String>,
    #[sqlx(rename = "company_website")]
    pub website: Option<String>,
    #[sqlx(rename = "company_has_logo")]
    pub has_logo: bool,
}

/// Dashboard counters for a company
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStats {
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub total_applications: i64,
    pub pending_reviews: i64,
}
