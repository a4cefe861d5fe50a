//! The search engine runs as a single task owning all query state.
//! Commands arrive over an unbounded channel, the rendered view leaves
//! over a watch channel, and every fetch carries a monotonically
//! increasing request id so a slow response can never overwrite the
//! results of a newer one.

use std::sync::Arc;

use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use log::{debug, error};
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;

use crate::domain::listing::{Category, Condition};
use crate::pagination::{DEFAULT_PAGE_SIZE, PageBounds};
use crate::repository::errors::RepositoryResult;
use crate::search::debounce::Debouncer;
use crate::search::store::{ResultPage, SearchStore, UrlSync};
use crate::search::{
    DEBOUNCE_WINDOW, FETCH_TIMEOUT, MIN_SUGGESTION_LEN, PriceRange, QueryState, SUGGESTION_LIMIT,
    SortMode,
};

/// Everything the UI can ask of the engine.
#[derive(Debug, Clone)]
pub enum SearchCommand {
    /// The search box changed. Schedules a debounced search and, from
    /// two characters up, an immediate suggestion fetch.
    Input(String),
    /// A suggestion was picked: it becomes the query text, the
    /// suggestion list clears, and exactly one debounced search is
    /// scheduled.
    SelectSuggestion(String),
    ToggleCategory(Category),
    ToggleCondition(Condition),
    RemoveCategory(Category),
    RemoveCondition(Condition),
    SetPriceRange(PriceRange),
    SetSort(SortMode),
    /// 1-based. Page 0, the current page, and page clicks while the
    /// search box is empty are ignored; any other page fires a search
    /// immediately.
    GoToPage(usize),
}

/// Where the latest search request stands. `request` ties the phase to
/// the fetch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading { request: u64 },
    Loaded { request: u64 },
    Failed { request: u64 },
}

/// Snapshot published to the UI after every state change.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub query: QueryState,
    pub phase: FetchPhase,
    /// Last successfully fetched page, kept on screen through reloads
    /// and store errors. `None` until the first search completes.
    pub results: Option<ResultPage>,
    pub suggestions: Vec<String>,
}

/// What the UI should draw, derived from [`ViewState`] in fixed
/// precedence: busy beats error beats content.
#[derive(Debug, PartialEq)]
pub enum RenderState<'a> {
    Busy,
    Error,
    Unsearched,
    NoResults,
    Items {
        page: &'a ResultPage,
        bounds: PageBounds,
    },
}

impl ViewState {
    pub fn render(&self) -> RenderState<'_> {
        match &self.phase {
            FetchPhase::Loading { .. } => RenderState::Busy,
            FetchPhase::Failed { .. } => RenderState::Error,
            FetchPhase::Idle | FetchPhase::Loaded { .. } => match &self.results {
                None => RenderState::Unsearched,
                Some(page) if page.items.is_empty() => RenderState::NoResults,
                Some(page) => RenderState::Items {
                    page,
                    bounds: PageBounds::new(self.query.page, page.total, DEFAULT_PAGE_SIZE),
                },
            },
        }
    }
}

/// Cloneable handle to a spawned engine. Dropping every handle closes
/// the command channel and winds the engine task down, cancelling any
/// pending debounce with it.
#[derive(Clone)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<SearchCommand>,
    view: watch::Receiver<ViewState>,
}

impl SearchHandle {
    /// Delivery is best effort: commands sent after the engine stopped
    /// are dropped.
    pub fn send(&self, command: SearchCommand) {
        let _ = self.commands.send(command);
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    pub fn snapshot(&self) -> ViewState {
        self.view.borrow().clone()
    }
}

// None marks a fetch that outlived FETCH_TIMEOUT.
type SearchFetch = BoxFuture<'static, (u64, Option<RepositoryResult<ResultPage>>)>;
type SuggestFetch = BoxFuture<'static, (u64, RepositoryResult<Vec<String>>)>;

pub struct SearchEngine<S, U> {
    store: Arc<S>,
    url: U,
    state: QueryState,
    view: watch::Sender<ViewState>,
    commands: mpsc::UnboundedReceiver<SearchCommand>,
    debounce: Debouncer,
    searches: FuturesUnordered<SearchFetch>,
    suggests: FuturesUnordered<SuggestFetch>,
    // Shared monotonic counter; only a completion matching the latest
    // dispatched id of its kind is ever applied.
    requests: u64,
    latest_search: u64,
    latest_suggest: u64,
}

impl<S, U> SearchEngine<S, U>
where
    S: SearchStore + 'static,
    U: UrlSync + 'static,
{
    /// Spawns the engine task. A restored non-empty query fires a search
    /// right away, so reloading a search URL shows results without a
    /// keystroke.
    pub fn spawn(store: S, url: U, initial: QueryState) -> SearchHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(ViewState {
            query: initial.clone(),
            phase: FetchPhase::Idle,
            results: None,
            suggestions: Vec::new(),
        });

        let mut engine = Self {
            store: Arc::new(store),
            url,
            state: initial,
            view: view_tx,
            commands: command_rx,
            debounce: Debouncer::new(DEBOUNCE_WINDOW),
            searches: FuturesUnordered::new(),
            suggests: FuturesUnordered::new(),
            requests: 0,
            latest_search: 0,
            latest_suggest: 0,
        };

        tokio::spawn(async move {
            if !engine.state.text.is_empty() {
                engine.fire_search();
            }
            engine.run().await;
        });

        SearchHandle {
            commands: command_tx,
            view: view_rx,
        }
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                _ = self.debounce.expired(), if self.debounce.is_armed() => {
                    self.debounce.disarm();
                    self.fire_search();
                }
                Some((id, outcome)) = self.searches.next(), if !self.searches.is_empty() => {
                    self.on_search_done(id, outcome);
                }
                Some((id, outcome)) = self.suggests.next(), if !self.suggests.is_empty() => {
                    self.on_suggest_done(id, outcome);
                }
            }
        }
    }

    fn handle(&mut self, command: SearchCommand) {
        match command {
            SearchCommand::Input(text) => self.on_input(text),
            SearchCommand::SelectSuggestion(title) => {
                self.state.text = title;
                self.state.page = 1;
                self.view.send_modify(|view| view.suggestions.clear());
                self.publish_query();
                self.debounce.schedule();
            }
            SearchCommand::ToggleCategory(category) => {
                self.state.toggle_category(category);
                self.publish_query();
            }
            SearchCommand::ToggleCondition(condition) => {
                self.state.toggle_condition(condition);
                self.publish_query();
            }
            SearchCommand::RemoveCategory(category) => {
                self.state.remove_category(category);
                self.publish_query();
            }
            SearchCommand::RemoveCondition(condition) => {
                self.state.remove_condition(condition);
                self.publish_query();
            }
            SearchCommand::SetPriceRange(price) => {
                self.state.set_price(price);
                self.publish_query();
            }
            SearchCommand::SetSort(sort) => {
                self.state.set_sort(sort);
                self.publish_query();
            }
            SearchCommand::GoToPage(page) => {
                // An empty box never fetches; the kept results stay as
                // they are.
                if page == 0 || page == self.state.page || self.state.text.trim().is_empty() {
                    return;
                }
                self.state.page = page;
                self.publish_query();
                self.debounce.disarm();
                self.fire_search();
            }
        }
    }

    fn on_input(&mut self, text: String) {
        self.state.text = text;
        self.state.page = 1;
        self.publish_query();

        let trimmed = self.state.text.trim().to_string();
        if trimmed.is_empty() {
            // Clearing the box cancels any pending search outright.
            self.debounce.disarm();
            self.view.send_modify(|view| view.suggestions.clear());
            return;
        }

        self.debounce.schedule();

        if trimmed.chars().count() >= MIN_SUGGESTION_LEN {
            self.fire_suggest(trimmed);
        } else {
            self.view.send_modify(|view| view.suggestions.clear());
        }
    }

    fn fire_search(&mut self) {
        self.requests += 1;
        let id = self.requests;
        self.latest_search = id;

        self.url.record_query(&self.state.text);

        // The predicate is built here, at fire time, so filters or pages
        // changed during the debounce window are picked up.
        let query = self.state.to_search_query();
        let store = Arc::clone(&self.store);
        self.searches.push(Box::pin(async move {
            match timeout(FETCH_TIMEOUT, store.search(query)).await {
                Ok(outcome) => (id, Some(outcome)),
                Err(_) => (id, None),
            }
        }));

        self.view
            .send_modify(|view| view.phase = FetchPhase::Loading { request: id });
    }

    fn fire_suggest(&mut self, partial: String) {
        self.requests += 1;
        let id = self.requests;
        self.latest_suggest = id;

        let store = Arc::clone(&self.store);
        self.suggests.push(Box::pin(async move {
            let outcome = store.suggest(&partial, SUGGESTION_LIMIT).await;
            (id, outcome)
        }));
    }

    fn on_search_done(&mut self, id: u64, outcome: Option<RepositoryResult<ResultPage>>) {
        if id != self.latest_search {
            debug!("dropping stale search response {id} (latest {})", self.latest_search);
            return;
        }

        match outcome {
            Some(Ok(page)) => self.view.send_modify(|view| {
                view.phase = FetchPhase::Loaded { request: id };
                view.results = Some(page);
            }),
            Some(Err(err)) => {
                // Store errors keep the last good results on screen.
                error!("search fetch {id} failed: {err}");
                self.view
                    .send_modify(|view| view.phase = FetchPhase::Idle);
            }
            None => {
                error!("search fetch {id} timed out");
                self.view
                    .send_modify(|view| view.phase = FetchPhase::Failed { request: id });
            }
        }
    }

    fn on_suggest_done(&mut self, id: u64, outcome: RepositoryResult<Vec<String>>) {
        if id != self.latest_suggest {
            return;
        }

        match outcome {
            Ok(titles) => self.view.send_modify(|view| view.suggestions = titles),
            Err(err) => debug!("suggestion fetch {id} failed: {err}"),
        }
    }

    fn publish_query(&mut self) {
        let query = self.state.clone();
        self.view.send_modify(|view| view.query = query);
    }
}
