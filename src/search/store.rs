use async_trait::async_trait;
use tokio::task;

use crate::domain::listing::Listing;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ListingReader, ListingSearchQuery};

/// One page of matching listings plus the exact predicate-wide total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultPage {
    pub items: Vec<Listing>,
    pub total: usize,
}

/// Async face of the listing store as the search engine sees it.
#[async_trait]
pub trait SearchStore: Send + Sync {
    async fn search(&self, query: ListingSearchQuery) -> RepositoryResult<ResultPage>;
    async fn suggest(&self, partial: &str, limit: usize) -> RepositoryResult<Vec<String>>;
}

/// Mirrors the committed query text into the navigable URL so a page
/// reload restores the search.
pub trait UrlSync: Send {
    fn record_query(&mut self, q: &str);
}

/// [`SearchStore`] over the Diesel repository. Queries run on the
/// blocking pool so the engine loop never stalls on SQLite.
#[derive(Clone)]
pub struct DieselSearchStore {
    repo: DieselRepository,
}

impl DieselSearchStore {
    pub fn new(repo: DieselRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SearchStore for DieselSearchStore {
    async fn search(&self, query: ListingSearchQuery) -> RepositoryResult<ResultPage> {
        let repo = self.repo.clone();
        task::spawn_blocking(move || {
            let (total, items) = repo.search_listings(query)?;
            Ok(ResultPage { items, total })
        })
        .await
        .map_err(|e| RepositoryError::Unexpected(format!("search task failed: {e}")))?
    }

    async fn suggest(&self, partial: &str, limit: usize) -> RepositoryResult<Vec<String>> {
        let repo = self.repo.clone();
        let partial = partial.to_string();
        task::spawn_blocking(move || repo.suggest_titles(&partial, limit))
            .await
            .map_err(|e| RepositoryError::Unexpected(format!("suggestion task failed: {e}")))?
    }
}
