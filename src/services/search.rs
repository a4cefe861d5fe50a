//! Services backing the search page and the search API.

use crate::dto::search::SearchPageData;
use crate::pagination::{DEFAULT_PAGE_SIZE, PageBounds, Paginated};
use crate::models::auth::AuthenticatedUser;
use crate::repository::ListingReader;
use crate::routes::ensure_role;
use crate::search::{MIN_SUGGESTION_LEN, QueryState, SUGGESTION_LIMIT};
use crate::services::ServiceResult;
use crate::SERVICE_ACCESS_ROLE;

/// Runs a full listing search for the given query state and pages the
/// result.
pub fn load_search_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    state: QueryState,
) -> ServiceResult<SearchPageData>
where
    R: ListingReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (total, items) = repo.search_listings(state.to_search_query()).map_err(|err| {
        log::error!("Failed to search listings: {err}");
        err
    })?;

    let bounds = PageBounds::new(state.page, total, DEFAULT_PAGE_SIZE);
    let listings = Paginated::new(items, bounds);

    Ok(SearchPageData {
        listings,
        total,
        state,
    })
}

/// Title completions for a typed partial. Anything shorter than the
/// suggestion threshold returns no completions without touching the
/// store.
pub fn suggest_titles<R>(
    repo: &R,
    user: &AuthenticatedUser,
    partial: &str,
) -> ServiceResult<Vec<String>>
where
    R: ListingReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let partial = partial.trim();
    if partial.chars().count() < MIN_SUGGESTION_LEN {
        return Ok(Vec::new());
    }

    repo.suggest_titles(partial, SUGGESTION_LIMIT)
        .map_err(Into::into)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    fn member_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "member@example.com".to_string(),
            name: "Member".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn stranger_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "stranger@example.com".to_string(),
            name: "Stranger".to_string(),
            roles: vec!["other_service".to_string()],
            exp: 0,
        }
    }

    #[test]
    fn search_requires_the_access_role() {
        let mut repo = MockRepository::new();
        repo.expect_search_listings().times(0);

        let result = load_search_page(&repo, &stranger_user(), QueryState::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn search_pages_the_total() {
        let mut repo = MockRepository::new();
        repo.expect_search_listings()
            .withf(|query| query.range == Some((0, 11)))
            .times(1)
            .returning(|_| Ok((25, Vec::new())));

        let data = load_search_page(&repo, &member_user(), QueryState::restore(Some("lamp")))
            .expect("should search");

        assert_eq!(data.total, 25);
        assert_eq!(data.listings.page_count, 3);
    }

    #[test]
    fn short_partials_skip_the_store() {
        let mut repo = MockRepository::new();
        repo.expect_suggest_titles().times(0);

        let suggestions = suggest_titles(&repo, &member_user(), " l ").expect("should suggest");

        assert!(suggestions.is_empty());
    }

    #[test]
    fn suggestions_are_capped() {
        let mut repo = MockRepository::new();
        repo.expect_suggest_titles()
            .withf(|partial, limit| partial == "lamp" && *limit == SUGGESTION_LIMIT)
            .times(1)
            .returning(|_, _| Ok(vec!["Lamp".to_string()]));

        let suggestions = suggest_titles(&repo, &member_user(), "lamp").expect("should suggest");

        assert_eq!(suggestions, vec!["Lamp"]);
    }
}
