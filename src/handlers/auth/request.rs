//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH},
    db::repositories::CompanyFields,
    models::{CompanySize, ContactInfo, Role, SocialMedia},
    utils::{non_blank, validation::validate_not_blank},
};

/// User registration request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(max = MAX_NAME_LENGTH), custom(function = validate_not_blank))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    #[serde(default)]
    pub role: Role,

    pub company_details: Option<CompanyDetailsRequest>,
}

/// Company profile submitted alongside a company registration
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetailsRequest {
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub size: Option<CompanySize>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub social_media: SocialMedia,
    /// Flat contact fields; `email` falls back to the account email
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl RegisterRequest {
    /// Normalized account email
    pub fn email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Contact info for the company row
    pub fn contact_info(&self) -> ContactInfo {
        let details = self.company_details.as_ref();
        ContactInfo {
            email: details
                .and_then(|d| non_blank(d.email.as_deref()))
                .map(str::to_string)
                .or_else(|| Some(self.email())),
            phone: details.and_then(|d| d.phone.clone()),
            address: details.and_then(|d| d.address.clone()),
        }
    }

    /// Company fields, present only when name, industry and location are filled in
    pub fn company_fields<'a>(&'a self, contact_info: &'a ContactInfo) -> Option<CompanyFields<'a>> {
        let details = self.company_details.as_ref()?;
        Some(CompanyFields {
            company_name: non_blank(details.company_name.as_deref())?,
            industry: non_blank(details.industry.as_deref())?,
            size: details.size,
            location: non_blank(details.location.as_deref())?,
            website: non_blank(details.website.as_deref()),
            description: non_blank(details.description.as_deref()),
            social_media: &details.social_media,
            contact_info,
        })
    }
}

/// User login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(json: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_role_defaults_to_candidate() {
        let req = register(serde_json::json!({
            "name": "Ada", "email": "ada@example.com", "password": "secret1"
        }));
        assert_eq!(req.role, Role::Candidate);
        assert!(req.validate().is_ok());
        let contact = req.contact_info();
        assert!(req.company_fields(&contact).is_none());
    }

    #[test]
    fn test_company_fields_require_name_industry_location() {
        let req = register(serde_json::json!({
            "name": "Acme HR", "email": "HR@Acme.io", "password": "secret1", "role": "company",
            "companyDetails": { "companyName": "Acme", "industry": "Software", "location": "  " }
        }));
        let contact = req.contact_info();
        assert!(req.company_fields(&contact).is_none());

        let req = register(serde_json::json!({
            "name": "Acme HR", "email": "HR@Acme.io", "password": "secret1", "role": "company",
            "companyDetails": {
                "companyName": "Acme", "industry": "Software", "location": "Berlin",
                "size": "51-200", "phone": "+49 30 1234"
            }
        }));
        let contact = req.contact_info();
        let fields = req.company_fields(&contact).unwrap();
        assert_eq!(fields.company_name, "Acme");
        assert_eq!(fields.size, Some(CompanySize::Small));
        assert_eq!(fields.contact_info.email.as_deref(), Some("hr@acme.io"));
        assert_eq!(fields.contact_info.phone.as_deref(), Some("+49 30 1234"));
    }

    #[test]
    fn test_short_password_rejected() {
        let req = register(serde_json::json!({
            "name": "Ada", "email": "ada@example.com", "password": "123"
        }));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let req = register(serde_json::json!({
            "name": "   ", "email": "ada@example.com", "password": "secret1"
        }));
        assert!(req.validate().is_err());
    }
}
