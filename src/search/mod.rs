//! Search query engine: debounced query dispatch, suggestion fetch,
//! filter/sort reconciliation and pagination over the listing store.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::listing::{Category, Condition};
use crate::pagination::{DEFAULT_PAGE_SIZE, page_range};
use crate::repository::ListingSearchQuery;

pub mod debounce;
pub mod engine;
pub mod store;

pub use engine::{FetchPhase, RenderState, SearchCommand, SearchEngine, SearchHandle, ViewState};
pub use store::{DieselSearchStore, ResultPage, SearchStore, UrlSync};

/// Quiescence window between the last keystroke and the search dispatch.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// A search fetch outliving this deadline is promoted to a visible error.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of title suggestions shown while typing.
pub const SUGGESTION_LIMIT: usize = 5;

/// Minimum typed length before a suggestion fetch is dispatched.
pub const MIN_SUGGESTION_LEN: usize = 2;

/// Server-side sort order applied by the store. Results are never
/// re-sorted client side.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::Relevance => "relevance",
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for SortMode {
    fn from(s: &str) -> Self {
        match s {
            "oldest" => SortMode::Oldest,
            "relevance" => SortMode::Relevance,
            _ => SortMode::Newest,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("price range lower bound must not exceed the upper bound")]
pub struct InvalidPriceRange;

/// Inclusive, non-negative price bounds with `lower <= upper`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    lower: i32,
    upper: i32,
}

impl PriceRange {
    pub fn new(lower: i32, upper: i32) -> Result<Self, InvalidPriceRange> {
        if lower < 0 || lower > upper {
            return Err(InvalidPriceRange);
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> i32 {
        self.lower
    }

    pub fn upper(&self) -> i32 {
        self.upper
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            lower: 0,
            upper: i32::MAX,
        }
    }
}

/// The single source of truth driving every fetch: free text, 1-based
/// page, filter sets, price bounds and sort mode.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState {
    pub text: String,
    pub page: usize,
    pub categories: BTreeSet<Category>,
    pub conditions: BTreeSet<Condition>,
    pub price: PriceRange,
    pub sort: SortMode,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            text: String::new(),
            page: 1,
            categories: BTreeSet::new(),
            conditions: BTreeSet::new(),
            price: PriceRange::default(),
            sort: SortMode::default(),
        }
    }
}

impl QueryState {
    /// Rebuilds query state from the navigable URL. Only the `q`
    /// parameter is persisted; page and filters always start fresh.
    pub fn restore(q: Option<&str>) -> Self {
        Self {
            text: q.map(str::trim).unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// Idempotent per item: toggling the same value twice returns the
    /// set to its original state. Resets pagination.
    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
        self.page = 1;
    }

    pub fn toggle_condition(&mut self, condition: Condition) {
        if !self.conditions.remove(&condition) {
            self.conditions.insert(condition);
        }
        self.page = 1;
    }

    /// Removing a filter chip converges to the same set as unchecking
    /// the source checkbox.
    pub fn remove_category(&mut self, category: Category) {
        self.categories.remove(&category);
        self.page = 1;
    }

    pub fn remove_condition(&mut self, condition: Condition) {
        self.conditions.remove(&condition);
        self.page = 1;
    }

    pub fn set_price(&mut self, price: PriceRange) {
        self.price = price;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.page = 1;
    }

    /// Builds the store predicate from the current state. Called at fire
    /// time so page and filters are read fresh, never captured early.
    pub fn to_search_query(&self) -> ListingSearchQuery {
        let (start, end) = page_range(self.page, DEFAULT_PAGE_SIZE);
        ListingSearchQuery::new(&self.text)
            .categories(self.categories.clone())
            .conditions(self.conditions.clone())
            .price(self.price)
            .sort(self.sort)
            .range(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_a_category_twice_restores_the_set() {
        let mut state = QueryState::default();
        let original = state.categories.clone();

        state.toggle_category(Category::Books);
        assert!(state.categories.contains(&Category::Books));

        state.toggle_category(Category::Books);
        assert_eq!(state.categories, original);
    }

    #[test]
    fn chip_removal_matches_checkbox_untoggle() {
        let mut via_toggle = QueryState::default();
        via_toggle.toggle_category(Category::Toys);
        via_toggle.toggle_category(Category::Books);
        via_toggle.toggle_category(Category::Toys);

        let mut via_chip = QueryState::default();
        via_chip.toggle_category(Category::Toys);
        via_chip.toggle_category(Category::Books);
        via_chip.remove_category(Category::Toys);

        assert_eq!(via_toggle.categories, via_chip.categories);
    }

    #[test]
    fn filter_mutations_reset_pagination() {
        let mut state = QueryState {
            page: 4,
            ..QueryState::default()
        };
        state.toggle_condition(Condition::Good);
        assert_eq!(state.page, 1);

        state.page = 3;
        state.set_sort(SortMode::Oldest);
        assert_eq!(state.page, 1);

        state.page = 2;
        state.set_price(PriceRange::new(0, 50).unwrap());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn restore_only_reads_the_query_text() {
        let state = QueryState::restore(Some("  lamp "));
        assert_eq!(state.text, "lamp");
        assert_eq!(state.page, 1);
        assert!(state.categories.is_empty());
    }

    #[test]
    fn price_range_rejects_inverted_bounds() {
        assert!(PriceRange::new(10, 5).is_err());
        assert!(PriceRange::new(-1, 5).is_err());
        assert!(PriceRange::new(5, 5).is_ok());
    }

    #[test]
    fn search_query_reflects_current_page() {
        let mut state = QueryState::restore(Some("lamp"));
        state.page = 2;
        let query = state.to_search_query();
        assert_eq!(query.range, Some((12, 23)));
        assert_eq!(query.text, "lamp");
    }
}
