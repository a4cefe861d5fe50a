use crate::domain::listing::Listing;

/// Data required to render the landing page.
pub struct IndexPageData {
    /// Most recently posted listings shown on the front page.
    pub recent: Vec<Listing>,
}
