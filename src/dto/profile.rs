use crate::domain::profile::Profile;

/// Data for the profile page.
pub struct ProfilePageData {
    pub profile: Profile,
    pub saved_count: usize,
}
