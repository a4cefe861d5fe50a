//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::activity::{ActivityEntry, NewActivityEntry};
use crate::domain::listing::{Listing, NewListing};
use crate::domain::profile::{NewProfile, Profile, UpdateProfile};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, ListingReader, ListingSearchQuery,
    ListingWriter, Pagination, ProfileReader, ProfileWriter, SavedItemReader, SavedItemWriter,
};

mock! {
    pub Repository {}

    impl ListingReader for Repository {
        fn get_listing_by_id(&self, id: i32) -> RepositoryResult<Option<Listing>>;
        fn search_listings(
            &self,
            query: ListingSearchQuery,
        ) -> RepositoryResult<(usize, Vec<Listing>)>;
        fn suggest_titles(&self, partial: &str, limit: usize) -> RepositoryResult<Vec<String>>;
        fn list_recent_listings(&self, limit: usize) -> RepositoryResult<Vec<Listing>>;
    }

    impl ListingWriter for Repository {
        fn create_listing(&self, new_listing: &NewListing) -> RepositoryResult<Listing>;
        fn delete_listing(&self, listing_id: i32) -> RepositoryResult<()>;
    }

    impl ProfileReader for Repository {
        fn get_profile_by_id(&self, id: i32) -> RepositoryResult<Option<Profile>>;
        fn get_profile_by_email(&self, email: &str) -> RepositoryResult<Option<Profile>>;
    }

    impl ProfileWriter for Repository {
        fn create_or_update_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
        fn update_profile(
            &self,
            profile_id: i32,
            updates: &UpdateProfile,
        ) -> RepositoryResult<Profile>;
    }

    impl SavedItemReader for Repository {
        fn list_saved_listings(
            &self,
            profile_id: i32,
            pagination: Option<Pagination>,
        ) -> RepositoryResult<(usize, Vec<Listing>)>;
        fn is_listing_saved(&self, profile_id: i32, listing_id: i32) -> RepositoryResult<bool>;
    }

    impl SavedItemWriter for Repository {
        fn save_listing(&self, profile_id: i32, listing_id: i32) -> RepositoryResult<bool>;
        fn unsave_listing(&self, profile_id: i32, listing_id: i32) -> RepositoryResult<bool>;
    }

    impl ActivityReader for Repository {
        fn list_activity(
            &self,
            query: ActivityListQuery,
        ) -> RepositoryResult<(usize, Vec<(ActivityEntry, Profile)>)>;
    }

    impl ActivityWriter for Repository {
        fn log_activity(&self, entry: &NewActivityEntry) -> RepositoryResult<ActivityEntry>;
    }
}
