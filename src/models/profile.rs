use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::profile::{
    NewProfile as DomainNewProfile, Profile as DomainProfile, UpdateProfile as DomainUpdateProfile,
};

/// Diesel model for [`crate::domain::profile::Profile`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Profile`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfile<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub avatar_url: Option<&'a str>,
}

/// Data used when updating a [`Profile`] record.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::profiles)]
pub struct UpdateProfile<'a> {
    pub name: &'a str,
    pub avatar_url: Option<&'a str>,
    pub location: Option<&'a str>,
}

impl From<Profile> for DomainProfile {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            avatar_url: profile.avatar_url,
            location: profile.location,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProfile> for NewProfile<'a> {
    fn from(profile: &'a DomainNewProfile) -> Self {
        Self {
            name: profile.name.as_str(),
            email: profile.email.as_str(),
            avatar_url: profile.avatar_url.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProfile> for UpdateProfile<'a> {
    fn from(profile: &'a DomainUpdateProfile) -> Self {
        Self {
            name: profile.name.as_str(),
            avatar_url: profile.avatar_url.as_deref(),
            location: profile.location.as_deref(),
        }
    }
}
