//! Company request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH},
    db::repositories::CompanyFields,
    models::{CompanySize, ContactInfo, SocialMedia},
    utils::{non_blank, validation::validate_not_blank},
};

/// Full replacement of the editable company profile
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyRequest {
    #[validate(length(max = MAX_NAME_LENGTH), custom(function = validate_not_blank))]
    pub company_name: String,
    #[validate(length(max = MAX_NAME_LENGTH), custom(function = validate_not_blank))]
    pub industry: String,
    pub size: Option<CompanySize>,
    #[validate(length(max = MAX_NAME_LENGTH), custom(function = validate_not_blank))]
    pub location: String,
    pub website: Option<String>,
    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
    #[serde(default)]
    pub social_media: SocialMedia,
    #[serde(default)]
    pub contact_info: ContactInfo,
}

impl UpdateCompanyRequest {
    pub fn as_fields(&self) -> CompanyFields<'_> {
        CompanyFields {
            company_name: self.company_name.trim(),
            industry: self.industry.trim(),
            size: self.size,
            location: self.location.trim(),
            website: non_blank(self.website.as_deref()),
            description: non_blank(self.description.as_deref()),
            social_media: &self.social_media,
            contact_info: &self.contact_info,
        }
    }
}
