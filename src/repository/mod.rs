use std::collections::BTreeSet;

use crate::db::DbPool;
use crate::domain::activity::{ActivityEntry, ActivityKind, NewActivityEntry};
use crate::domain::listing::{Category, Condition, Listing, NewListing};
use crate::domain::profile::{NewProfile, Profile, UpdateProfile};
use crate::pagination::page_range;
use crate::repository::errors::RepositoryResult;
use crate::search::{PriceRange, SortMode};

pub mod activity;
pub mod errors;
pub mod listing;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod profile;
pub mod saved;

/// Diesel-backed implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<crate::db::DbConnection> {
        Ok(crate::db::get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Full predicate of a listing search: free text plus every active
/// filter, the sort mode, and an inclusive zero-based row range.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSearchQuery {
    pub text: String,
    pub categories: BTreeSet<Category>,
    pub conditions: BTreeSet<Condition>,
    pub price: PriceRange,
    pub sort: SortMode,
    pub range: Option<(usize, usize)>,
}

impl ListingSearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            categories: BTreeSet::new(),
            conditions: BTreeSet::new(),
            price: PriceRange::default(),
            sort: SortMode::default(),
            range: None,
        }
    }

    pub fn categories(mut self, categories: BTreeSet<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn conditions(mut self, conditions: BTreeSet<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Inclusive zero-based row range.
    pub fn range(mut self, start: usize, end: usize) -> Self {
        self.range = Some((start, end));
        self
    }

    pub fn paginate(self, page: usize, per_page: usize) -> Self {
        let (start, end) = page_range(page, per_page);
        self.range(start, end)
    }
}

#[derive(Debug, Clone)]
pub struct ActivityListQuery {
    pub kind: Option<ActivityKind>,
    pub pagination: Option<Pagination>,
}

impl ActivityListQuery {
    pub fn new() -> Self {
        Self {
            kind: None,
            pagination: None,
        }
    }

    pub fn kind(mut self, kind: ActivityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl Default for ActivityListQuery {
    fn default() -> Self {
        Self::new()
    }
}

pub trait ListingReader {
    fn get_listing_by_id(&self, id: i32) -> RepositoryResult<Option<Listing>>;
    /// Returns the exact total matching the predicate plus the requested
    /// page of rows, each joined with its lister summary.
    fn search_listings(&self, query: ListingSearchQuery) -> RepositoryResult<(usize, Vec<Listing>)>;
    /// Title completions for a typed partial, capped at `limit`.
    fn suggest_titles(&self, partial: &str, limit: usize) -> RepositoryResult<Vec<String>>;
    fn list_recent_listings(&self, limit: usize) -> RepositoryResult<Vec<Listing>>;
}

pub trait ListingWriter {
    fn create_listing(&self, new_listing: &NewListing) -> RepositoryResult<Listing>;
    fn delete_listing(&self, listing_id: i32) -> RepositoryResult<()>;
}

pub trait ProfileReader {
    fn get_profile_by_id(&self, id: i32) -> RepositoryResult<Option<Profile>>;
    fn get_profile_by_email(&self, email: &str) -> RepositoryResult<Option<Profile>>;
}

pub trait ProfileWriter {
    fn create_or_update_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
    fn update_profile(&self, profile_id: i32, updates: &UpdateProfile) -> RepositoryResult<Profile>;
}

pub trait SavedItemReader {
    fn list_saved_listings(
        &self,
        profile_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<Listing>)>;
    fn is_listing_saved(&self, profile_id: i32, listing_id: i32) -> RepositoryResult<bool>;
}

pub trait SavedItemWriter {
    /// Idempotent; returns false when the listing was already saved.
    fn save_listing(&self, profile_id: i32, listing_id: i32) -> RepositoryResult<bool>;
    fn unsave_listing(&self, profile_id: i32, listing_id: i32) -> RepositoryResult<bool>;
}

pub trait ActivityReader {
    fn list_activity(
        &self,
        query: ActivityListQuery,
    ) -> RepositoryResult<(usize, Vec<(ActivityEntry, Profile)>)>;
}

pub trait ActivityWriter {
    fn log_activity(&self, entry: &NewActivityEntry) -> RepositoryResult<ActivityEntry>;
}
