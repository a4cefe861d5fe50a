use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::activity::{
    ActivityEntry as DomainActivityEntry, ActivityKind, NewActivityEntry as DomainNewActivityEntry,
};

/// Diesel model for [`crate::domain::activity::ActivityEntry`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::activity_log)]
pub struct ActivityEntry {
    pub id: i32,
    pub profile_id: i32,
    pub kind: String,
    pub detail: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`ActivityEntry`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::activity_log)]
pub struct NewActivityEntry {
    pub profile_id: i32,
    pub kind: String,
    pub detail: String,
    pub created_at: NaiveDateTime,
}

impl From<ActivityEntry> for DomainActivityEntry {
    fn from(entry: ActivityEntry) -> Self {
        Self {
            id: entry.id,
            profile_id: entry.profile_id,
            kind: ActivityKind::from(entry.kind),
            detail: serde_json::from_str(&entry.detail).unwrap_or(Value::Null),
            created_at: entry.created_at,
        }
    }
}

impl From<&DomainNewActivityEntry> for NewActivityEntry {
    fn from(entry: &DomainNewActivityEntry) -> Self {
        Self {
            profile_id: entry.profile_id,
            kind: entry.kind.to_string(),
            detail: entry.detail.to_string(),
            created_at: entry.created_at,
        }
    }
}
