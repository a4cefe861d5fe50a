use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::domain::listing::{
    Category, Condition, ListerSummary, Listing as DomainListing, NewListing as DomainNewListing,
};

/// Diesel model for [`crate::domain::listing::Listing`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::listings)]
pub struct Listing {
    pub id: i32,
    pub profile_id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub price: i32,
    pub location: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Listing`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::listings)]
pub struct NewListing<'a> {
    pub profile_id: i32,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub condition: &'a str,
    pub price: i32,
    pub location: &'a str,
}

#[derive(Identifiable, Queryable, Selectable, Associations, Insertable, Serialize)]
#[diesel(table_name = crate::schema::listing_photos)]
#[diesel(belongs_to(Listing, foreign_key = listing_id))]
#[diesel(primary_key(listing_id, position))]
pub struct ListingPhoto {
    pub listing_id: i32,
    pub position: i32,
    pub url: String,
}

#[derive(Identifiable, Queryable, Selectable, Associations, Insertable, Serialize)]
#[diesel(table_name = crate::schema::listing_tags)]
#[diesel(belongs_to(Listing, foreign_key = listing_id))]
#[diesel(primary_key(listing_id, tag))]
pub struct ListingTag {
    pub listing_id: i32,
    pub tag: String,
}

impl Listing {
    /// Assembles the domain read projection from the row plus its
    /// associated photo URLs, tags and lister summary.
    pub fn into_domain(
        self,
        photos: Vec<String>,
        tags: Vec<String>,
        lister: ListerSummary,
    ) -> DomainListing {
        DomainListing {
            id: self.id,
            profile_id: self.profile_id,
            title: self.title,
            description: self.description,
            photos,
            category: Category::from(self.category),
            condition: Condition::from(self.condition),
            tags,
            price: self.price,
            location: self.location,
            created_at: self.created_at,
            lister,
        }
    }
}

impl<'a> From<&'a DomainNewListing> for NewListing<'a> {
    fn from(listing: &'a DomainNewListing) -> Self {
        Self {
            profile_id: listing.profile_id,
            title: listing.title.as_str(),
            description: listing.description.as_str(),
            category: listing.category.as_str(),
            condition: listing.condition.as_str(),
            price: listing.price,
            location: listing.location.as_str(),
        }
    }
}
