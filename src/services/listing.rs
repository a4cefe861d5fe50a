//! Services coordinating listing workflows: creation, detail pages and
//! saved items.

use serde_json::json;
use validator::Validate;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::activity::{ActivityKind, NewActivityEntry};
use crate::domain::listing::Listing;
use crate::dto::listing::{ListingPageData, SavedPageData};
use crate::forms::listing::AddListingForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_PAGE_SIZE, PageBounds, Paginated};
use crate::repository::{
    ActivityWriter, ListingReader, ListingWriter, Pagination, ProfileReader, SavedItemReader,
    SavedItemWriter,
};
use crate::routes::{check_role, ensure_role};
use crate::services::{ServiceError, ServiceResult, acting_profile};

/// Loads one listing with the viewer's saved flag.
pub fn get_listing_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    listing_id: i32,
) -> ServiceResult<ListingPageData>
where
    R: ListingReader + ProfileReader + SavedItemReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let viewer = acting_profile(repo, user)?;
    let listing = repo
        .get_listing_by_id(listing_id)?
        .ok_or(ServiceError::NotFound)?;
    let saved = repo.is_listing_saved(viewer.id, listing_id)?;

    Ok(ListingPageData { listing, saved })
}

/// Validates the add-listing form and persists the listing with its
/// photos and tags.
pub fn add_listing<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddListingForm,
) -> ServiceResult<Listing>
where
    R: ListingWriter + ProfileReader + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate listing form: {err}");
        return Err(ServiceError::Form("Invalid listing details.".to_string()));
    }

    let lister = acting_profile(repo, user)?;
    let new_listing = form.to_new_listing(lister.id);
    let listing = repo.create_listing(&new_listing).map_err(|err| {
        log::error!("Failed to create listing: {err}");
        err
    })?;

    record_activity(
        repo,
        lister.id,
        ActivityKind::ListingCreated,
        json!({ "listing_id": listing.id, "title": listing.title }),
    );

    Ok(listing)
}

/// Saves a listing for the user. Returns false when it was already
/// saved; only a fresh save is logged.
pub fn save_listing<R>(repo: &R, user: &AuthenticatedUser, listing_id: i32) -> ServiceResult<bool>
where
    R: SavedItemWriter + ProfileReader + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let viewer = acting_profile(repo, user)?;
    let saved = repo.save_listing(viewer.id, listing_id)?;
    if saved {
        record_activity(
            repo,
            viewer.id,
            ActivityKind::ListingSaved,
            json!({ "listing_id": listing_id }),
        );
    }

    Ok(saved)
}

pub fn unsave_listing<R>(repo: &R, user: &AuthenticatedUser, listing_id: i32) -> ServiceResult<bool>
where
    R: SavedItemWriter + ProfileReader + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let viewer = acting_profile(repo, user)?;
    let removed = repo.unsave_listing(viewer.id, listing_id)?;
    if removed {
        record_activity(
            repo,
            viewer.id,
            ActivityKind::ListingUnsaved,
            json!({ "listing_id": listing_id }),
        );
    }

    Ok(removed)
}

/// Loads the user's saved listings, newest save first.
pub fn load_saved_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: usize,
) -> ServiceResult<SavedPageData>
where
    R: SavedItemReader + ProfileReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let viewer = acting_profile(repo, user)?;
    let page = page.max(1);
    let (total, items) = repo.list_saved_listings(
        viewer.id,
        Some(Pagination {
            page,
            per_page: DEFAULT_PAGE_SIZE,
        }),
    )?;

    let bounds = PageBounds::new(page, total, DEFAULT_PAGE_SIZE);
    Ok(SavedPageData {
        listings: Paginated::new(items, bounds),
        total,
        page,
    })
}

/// Removes a listing. Only the lister or a manager may delete it.
pub fn delete_listing<R>(repo: &R, user: &AuthenticatedUser, listing_id: i32) -> ServiceResult<()>
where
    R: ListingReader + ListingWriter + ProfileReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let acting = acting_profile(repo, user)?;
    let listing = repo
        .get_listing_by_id(listing_id)?
        .ok_or(ServiceError::NotFound)?;

    if listing.profile_id != acting.id && !check_role(crate::SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_listing(listing_id).map_err(|err| {
        log::error!("Failed to delete listing {listing_id}: {err}");
        err
    })?;

    Ok(())
}

// Activity logging never fails the request that triggered it.
fn record_activity<R>(repo: &R, profile_id: i32, kind: ActivityKind, detail: serde_json::Value)
where
    R: ActivityWriter + ?Sized,
{
    if let Err(err) = repo.log_activity(&NewActivityEntry::new(profile_id, kind, detail)) {
        log::error!("Failed to log activity: {err}");
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::profile::Profile;
    use crate::repository::mock::MockRepository;

    fn member_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "token-subject".to_string(),
            email: "member@example.com".to_string(),
            name: "Member".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn member_profile() -> Profile {
        Profile {
            id: 7,
            name: "Member".to_string(),
            email: "member@example.com".to_string(),
            avatar_url: None,
            location: None,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn expect_member_lookup(repo: &mut MockRepository) {
        repo.expect_get_profile_by_email()
            .withf(|email| email == "member@example.com")
            .returning(|_| Ok(Some(member_profile())));
    }

    #[test]
    fn add_rejects_an_invalid_form() {
        let mut repo = MockRepository::new();
        repo.expect_create_listing().times(0);

        let form = AddListingForm {
            title: "ab".to_string(),
            description: String::new(),
            category: "furniture".to_string(),
            condition: "GOOD".to_string(),
            price: 0,
            location: "Leeds".to_string(),
            tags: String::new(),
            photos: String::new(),
        };

        let result = add_listing(&repo, &member_user(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn a_fresh_save_is_logged() {
        let mut repo = MockRepository::new();
        expect_member_lookup(&mut repo);
        repo.expect_save_listing()
            .withf(|profile_id, listing_id| *profile_id == 7 && *listing_id == 3)
            .times(1)
            .returning(|_, _| Ok(true));
        repo.expect_log_activity()
            .withf(|entry| entry.profile_id == 7 && entry.kind == ActivityKind::ListingSaved)
            .times(1)
            .returning(|entry| {
                Ok(crate::domain::activity::ActivityEntry {
                    id: 1,
                    profile_id: entry.profile_id,
                    kind: entry.kind.clone(),
                    detail: entry.detail.clone(),
                    created_at: entry.created_at,
                })
            });

        assert!(save_listing(&repo, &member_user(), 3).expect("should save"));
    }

    #[test]
    fn a_repeated_save_is_not_logged() {
        let mut repo = MockRepository::new();
        expect_member_lookup(&mut repo);
        repo.expect_save_listing().times(1).returning(|_, _| Ok(false));
        repo.expect_log_activity().times(0);

        assert!(!save_listing(&repo, &member_user(), 3).expect("should be idempotent"));
    }

    #[test]
    fn only_the_lister_or_a_manager_may_delete() {
        let mut repo = MockRepository::new();
        expect_member_lookup(&mut repo);
        repo.expect_get_listing_by_id().times(1).returning(|_| {
            Ok(Some(crate::domain::listing::Listing {
                id: 3,
                profile_id: 99,
                title: "Lamp".to_string(),
                description: String::new(),
                photos: vec![],
                category: crate::domain::listing::Category::Other,
                condition: crate::domain::listing::Condition::Good,
                tags: vec![],
                price: 0,
                location: String::new(),
                created_at: chrono::Utc::now().naive_utc(),
                lister: Default::default(),
            }))
        });
        repo.expect_delete_listing().times(0);

        let result = delete_listing(&repo, &member_user(), 3);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
