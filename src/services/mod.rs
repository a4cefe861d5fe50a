pub mod activity;
pub mod errors;
pub mod listing;
pub mod main;
pub mod profile;
pub mod search;

pub use errors::{ServiceError, ServiceResult};

use crate::domain::profile::Profile;
use crate::models::auth::AuthenticatedUser;
use crate::repository::ProfileReader;

/// Resolves the signed-in user's local profile row. The auth service
/// mints tokens before the row exists, so the token subject says
/// nothing about local ids; the email claim is the durable link.
pub(crate) fn acting_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Profile>
where
    R: ProfileReader + ?Sized,
{
    repo.get_profile_by_email(&user.email)?
        .ok_or(ServiceError::NotFound)
}
