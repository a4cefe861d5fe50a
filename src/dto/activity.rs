use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::domain::activity::ActivityEntry;
use crate::domain::profile::Profile;
use crate::pagination::Paginated;

/// One activity row joined with the acting profile, flattened for the
/// template.
#[derive(Debug, Serialize)]
pub struct ActivityRow {
    pub kind: String,
    pub detail: Value,
    pub created_at: NaiveDateTime,
    pub profile_name: String,
}

impl From<(ActivityEntry, Profile)> for ActivityRow {
    fn from((entry, profile): (ActivityEntry, Profile)) -> Self {
        Self {
            kind: entry.kind.to_string(),
            detail: entry.detail,
            created_at: entry.created_at,
            profile_name: profile.name,
        }
    }
}

/// Data for the manager-facing activity page.
pub struct ActivityPageData {
    pub entries: Paginated<ActivityRow>,
    pub total: usize,
}
