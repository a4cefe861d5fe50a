use serde::Deserialize;
use validator::Validate;

use crate::domain::profile::UpdateProfile;

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(url)]
    pub avatar_url: Option<String>,
    #[validate(length(max = 120))]
    pub location: Option<String>,
}

impl From<ProfileForm> for UpdateProfile {
    fn from(form: ProfileForm) -> Self {
        UpdateProfile::new(form.name, form.avatar_url, form.location)
    }
}
