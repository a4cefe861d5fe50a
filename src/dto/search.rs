use serde::{Deserialize, Serialize};

use crate::domain::listing::{Category, Condition, Listing};
use crate::pagination::Paginated;
use crate::search::{PriceRange, QueryState, SortMode};

/// Parameters of the search page and the search API. Checkbox groups
/// repeat in the query string, so handlers parse the raw query with
/// `serde_html_form` instead of actix's single-value extractor.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<usize>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub condition: Vec<String>,
    pub price_min: Option<i32>,
    pub price_max: Option<i32>,
    pub sort: Option<String>,
}

impl SearchParams {
    /// Folds the raw parameters into query state. Unknown category or
    /// condition values fall back to their catch-all variants; an
    /// inverted price range is dropped rather than rejected.
    pub fn into_query_state(self) -> QueryState {
        let mut state = QueryState::restore(self.q.as_deref());
        state.categories = self
            .category
            .iter()
            .map(|c| Category::from(c.as_str()))
            .collect();
        state.conditions = self
            .condition
            .iter()
            .map(|c| Condition::from(c.as_str()))
            .collect();
        if let (Some(lower), Some(upper)) = (self.price_min, self.price_max)
            && let Ok(price) = PriceRange::new(lower, upper)
        {
            state.price = price;
        }
        if let Some(sort) = self.sort.as_deref() {
            state.sort = SortMode::from(sort);
        }
        state.page = self.page.unwrap_or(1).max(1);
        state
    }
}

/// Data rendered by the search results template.
pub struct SearchPageData {
    pub listings: Paginated<Listing>,
    pub total: usize,
    pub state: QueryState,
}

/// JSON body of `GET /api/v1/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: usize,
    pub rows: Vec<Listing>,
}

/// Query parameter of `GET /api/v1/suggestions`.
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub q: String,
}
