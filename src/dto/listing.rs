use crate::domain::listing::Listing;
use crate::pagination::Paginated;

/// Data for a single listing detail page.
pub struct ListingPageData {
    pub listing: Listing,
    /// Whether the viewing user already saved this listing.
    pub saved: bool,
}

/// Data for the saved-items page.
pub struct SavedPageData {
    pub listings: Paginated<Listing>,
    pub total: usize,
    pub page: usize,
}
