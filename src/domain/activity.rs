use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single entry in the manager-facing activity log.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    pub id: i32,
    pub profile_id: i32,
    pub kind: ActivityKind,
    pub detail: Value,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ActivityKind {
    ListingCreated,
    ListingSaved,
    ListingUnsaved,
    ProfileUpdated,
    Other(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewActivityEntry {
    pub profile_id: i32,
    pub kind: ActivityKind,
    pub detail: Value,
    pub created_at: NaiveDateTime,
}

impl NewActivityEntry {
    #[must_use]
    pub fn new(profile_id: i32, kind: ActivityKind, detail: Value) -> Self {
        Self {
            profile_id,
            kind,
            detail,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::ListingCreated => write!(f, "ListingCreated"),
            ActivityKind::ListingSaved => write!(f, "ListingSaved"),
            ActivityKind::ListingUnsaved => write!(f, "ListingUnsaved"),
            ActivityKind::ProfileUpdated => write!(f, "ProfileUpdated"),
            ActivityKind::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ActivityKind {
    fn from(s: &str) -> Self {
        match s {
            "ListingCreated" => ActivityKind::ListingCreated,
            "ListingSaved" => ActivityKind::ListingSaved,
            "ListingUnsaved" => ActivityKind::ListingUnsaved,
            "ProfileUpdated" => ActivityKind::ProfileUpdated,
            _ => ActivityKind::Other(s.to_string()),
        }
    }
}

impl From<String> for ActivityKind {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}
