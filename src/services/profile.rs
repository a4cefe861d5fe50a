//! Services coordinating profile workflows.

use serde_json::json;
use validator::Validate;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::activity::{ActivityKind, NewActivityEntry};
use crate::domain::profile::{NewProfile, Profile};
use crate::dto::profile::ProfilePageData;
use crate::forms::profile::ProfileForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ActivityWriter, ProfileReader, ProfileWriter, SavedItemReader};
use crate::routes::ensure_role;
use crate::services::{ServiceError, ServiceResult, acting_profile};

/// Upserts the local profile from the signed-in user's claims. Called
/// on first contact so every authenticated user has a profile row.
pub fn sync_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Profile>
where
    R: ProfileWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.create_or_update_profile(&NewProfile::new(
        user.name.clone(),
        user.email.clone(),
        None,
    ))
    .map_err(|err| {
        log::error!("Failed to sync profile: {err}");
        err.into()
    })
}

/// Loads the profile page for the signed-in user.
pub fn load_profile_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ProfilePageData>
where
    R: ProfileReader + SavedItemReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let profile = acting_profile(repo, user)?;
    let (saved_count, _) = repo.list_saved_listings(profile.id, None)?;

    Ok(ProfilePageData {
        profile,
        saved_count,
    })
}

/// Validates and applies profile edits, logging the update.
pub fn save_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProfileForm,
) -> ServiceResult<Profile>
where
    R: ProfileReader + ProfileWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate profile form: {err}");
        return Err(ServiceError::Form("Invalid profile details.".to_string()));
    }

    let acting = acting_profile(repo, user)?;
    let profile = repo.update_profile(acting.id, &form.into()).map_err(|err| {
        log::error!("Failed to update profile: {err}");
        err
    })?;

    if let Err(err) = repo.log_activity(&NewActivityEntry::new(
        acting.id,
        ActivityKind::ProfileUpdated,
        json!({ "name": profile.name }),
    )) {
        log::error!("Failed to log activity: {err}");
    }

    Ok(profile)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn member_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "token-subject".to_string(),
            email: "Member@Example.com".to_string(),
            name: "Member".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    #[test]
    fn the_profile_page_is_resolved_by_email_not_token_subject() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_email()
            .withf(|email| email == "Member@Example.com")
            .times(1)
            .returning(|_| {
                Ok(Some(Profile {
                    id: 9,
                    name: "Member".to_string(),
                    email: "member@example.com".to_string(),
                    avatar_url: None,
                    location: None,
                    created_at: chrono::Utc::now().naive_utc(),
                    updated_at: chrono::Utc::now().naive_utc(),
                }))
            });
        repo.expect_list_saved_listings()
            .withf(|profile_id, pagination| *profile_id == 9 && pagination.is_none())
            .times(1)
            .returning(|_, _| Ok((2, Vec::new())));

        let page = load_profile_page(&repo, &member_user()).expect("should load");

        assert_eq!(page.profile.id, 9);
        assert_eq!(page.saved_count, 2);
    }

    #[test]
    fn sync_normalizes_the_email() {
        let mut repo = MockRepository::new();
        repo.expect_create_or_update_profile()
            .withf(|new_profile| new_profile.email == "member@example.com")
            .times(1)
            .returning(|new_profile| {
                Ok(Profile {
                    id: 7,
                    name: new_profile.name.clone(),
                    email: new_profile.email.clone(),
                    avatar_url: None,
                    location: None,
                    created_at: chrono::Utc::now().naive_utc(),
                    updated_at: chrono::Utc::now().naive_utc(),
                })
            });

        let profile = sync_profile(&repo, &member_user()).expect("should sync");

        assert_eq!(profile.email, "member@example.com");
    }

    #[test]
    fn save_rejects_an_invalid_form() {
        let mut repo = MockRepository::new();
        repo.expect_update_profile().times(0);

        let form = ProfileForm {
            name: String::new(),
            avatar_url: None,
            location: None,
        };
        let result = save_profile(&repo, &member_user(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
