use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A registered community member: donor, beneficiary or manager.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl NewProfile {
    #[must_use]
    pub fn new(name: String, email: String, avatar_url: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            avatar_url: avatar_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: String,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
}

impl UpdateProfile {
    #[must_use]
    pub fn new(name: String, avatar_url: Option<String>, location: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            avatar_url: avatar_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            location: location
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
