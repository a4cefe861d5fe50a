use crate::SERVICE_ACCESS_ROLE;
use crate::dto::main::IndexPageData;
use crate::models::auth::AuthenticatedUser;
use crate::repository::ListingReader;
use crate::routes::ensure_role;
use crate::services::ServiceResult;

/// Number of fresh listings shown on the landing page.
const RECENT_LISTINGS: usize = 8;

/// Loads the landing page data.
pub fn load_index_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<IndexPageData>
where
    R: ListingReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let recent = repo.list_recent_listings(RECENT_LISTINGS).map_err(|err| {
        log::error!("Failed to load recent listings: {err}");
        err
    })?;

    Ok(IndexPageData { recent })
}
