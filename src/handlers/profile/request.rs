//! Profile request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH},
    db::repositories::ProfileUpdate,
};

/// Profile update; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub college: Option<String>,
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub degree: Option<String>,
    #[validate(range(min = 1950, max = 2100))]
    pub graduation_year: Option<i32>,
    pub skills: Option<Vec<String>>,
    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub bio: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
    #[validate(url)]
    pub linked_in: Option<String>,
    #[validate(url)]
    pub github: Option<String>,
}

impl UpdateProfileRequest {
    pub fn as_update(&self) -> ProfileUpdate<'_> {
        ProfileUpdate {
            college: self.college.as_deref(),
            degree: self.degree.as_deref(),
            graduation_year: self.graduation_year,
            skills: self.skills.as_deref(),
            bio: self.bio.as_deref(),
            phone_number: self.phone_number.as_deref(),
            linked_in: self.linked_in.as_deref(),
            github: self.github.as_deref(),
        }
    }
}
