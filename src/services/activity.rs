//! Services for the manager-facing activity log.

use crate::SERVICE_MANAGER_ROLE;
use crate::domain::activity::ActivityKind;
use crate::dto::activity::{ActivityPageData, ActivityRow};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_PAGE_SIZE, PageBounds, Paginated};
use crate::repository::{ActivityListQuery, ActivityReader};
use crate::routes::ensure_role;
use crate::services::ServiceResult;

/// Loads one page of the activity log, newest first, optionally
/// narrowed to a single activity kind.
pub fn load_activity_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: usize,
    kind: Option<&str>,
) -> ServiceResult<ActivityPageData>
where
    R: ActivityReader + ?Sized,
{
    ensure_role(user, SERVICE_MANAGER_ROLE)?;

    let page = page.max(1);
    let mut query = ActivityListQuery::new().paginate(page, DEFAULT_PAGE_SIZE);
    if let Some(kind) = kind.map(str::trim).filter(|k| !k.is_empty()) {
        query = query.kind(ActivityKind::from(kind));
    }

    let (total, rows) = repo.list_activity(query).map_err(|err| {
        log::error!("Failed to list activity: {err}");
        err
    })?;

    let bounds = PageBounds::new(page, total, DEFAULT_PAGE_SIZE);
    let entries = Paginated::new(rows.into_iter().map(ActivityRow::from).collect(), bounds);

    Ok(ActivityPageData { entries, total })
}
