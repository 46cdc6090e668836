use crate::paging::{FetchOutcome, PageCursor};
use crate::query::{self, SearchRequest};
use crate::scope::ScopedView;
use async_trait::async_trait;
use movie_explorer_models::{Genre, Movie};
use movie_explorer_sources::MovieSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const SEARCH_ERROR_PREFIX: &str = "Sorry, there was a problem with your search.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub cursor: PageCursor,
    pub loading: bool,
    pub error: Option<String>,
}

impl SearchState {
    pub fn results(&self) -> &[Movie] {
        &self.cursor.results
    }

    pub fn current_page(&self) -> u32 {
        self.cursor.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.cursor.total_pages
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }
}

#[derive(Default)]
struct SearchInner {
    state: SearchState,
    genres: Vec<Genre>,
    last_request: Option<(String, u32)>,
}

/// Paginated search over text queries and the advanced filter syntax.
///
/// Every submission takes a new generation number. A completion whose
/// generation is no longer current (a newer query or a reset happened in the
/// meantime) is dropped, so at most one request ever writes the state.
pub struct SearchOrchestrator {
    source: Arc<dyn MovieSource>,
    generation: AtomicU64,
    inner: RwLock<SearchInner>,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
            inner: RwLock::new(SearchInner::default()),
        }
    }

    /// Genre table used to resolve `genre:` filters
    pub async fn set_genres(&self, genres: Vec<Genre>) {
        self.inner.write().await.genres = genres;
    }

    pub async fn state(&self) -> SearchState {
        self.inner.read().await.state.clone()
    }

    /// Run `query` for `page`. Page 1 starts a fresh result list, later pages
    /// append to it.
    pub async fn search(&self, query: &str, page: u32) -> FetchOutcome {
        let started = {
            let mut inner = self.inner.write().await;
            self.begin(&mut inner, query, page)
        };
        match started {
            Some((generation, page, request)) => self.complete(generation, query.to_string(), page, request).await,
            None => FetchOutcome::Ignored,
        }
    }

    /// Fetch the next page of the current query
    pub async fn load_more(&self) -> FetchOutcome {
        let (query, started) = {
            let mut inner = self.inner.write().await;
            let state = &inner.state;
            if state.loading || !state.has_more() || state.query.trim().is_empty() {
                debug!(
                    "Load more ignored (loading: {}, has_more: {})",
                    state.loading,
                    state.has_more()
                );
                return FetchOutcome::Ignored;
            }
            let query = state.query.clone();
            let page = state.cursor.next_page();
            let started = self.begin(&mut inner, &query, page);
            (query, started)
        };
        match started {
            Some((generation, page, request)) => self.complete(generation, query, page, request).await,
            None => FetchOutcome::Ignored,
        }
    }

    /// Re-issue the last request after it failed
    pub async fn retry(&self) -> FetchOutcome {
        let last = {
            let inner = self.inner.read().await;
            if inner.state.loading || inner.state.error.is_none() {
                return FetchOutcome::Ignored;
            }
            inner.last_request.clone()
        };
        match last {
            Some((query, page)) => self.search(&query, page).await,
            None => FetchOutcome::Ignored,
        }
    }

    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        self.invalidate();
        inner.state = SearchState::default();
        inner.last_request = None;
        debug!("Search state reset");
    }

    fn begin(&self, inner: &mut SearchInner, query: &str, page: u32) -> Option<(u64, u32, SearchRequest)> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().is_empty() {
            debug!("Search skipped: empty query");
            inner.state.cursor.restart();
            inner.state.loading = false;
            return None;
        }

        let page = page.max(1);
        inner.state.loading = true;
        inner.state.error = None;
        if page == 1 {
            inner.state.cursor.restart();
        }
        inner.last_request = Some((query.to_string(), page));

        let request = query::plan(query, &inner.genres, page);
        if let SearchRequest::Discover(parsed) = &request {
            if !parsed.reserved.is_empty() {
                warn!("Unsupported search filters ignored: {}", parsed.reserved.join(", "));
            }
        }
        debug!("Searching '{}' page {} (generation {})", query, page, generation);
        Some((generation, page, request))
    }

    async fn complete(&self, generation: u64, query: String, page: u32, request: SearchRequest) -> FetchOutcome {
        let result = match request {
            SearchRequest::Text { query, page } => self.source.search(&query, page).await,
            SearchRequest::Discover(parsed) => self.source.discover(&parsed.options).await,
        };

        let mut inner = self.inner.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale search result for '{}' page {}", query, page);
            return FetchOutcome::Stale;
        }
        inner.state.loading = false;

        match result {
            Ok(response) => {
                inner.state.cursor.merge(page, response);
                inner.state.query = query;
                info!(
                    "Search '{}': page {}/{} ({} results)",
                    inner.state.query,
                    inner.state.cursor.current_page,
                    inner.state.cursor.total_pages,
                    inner.state.cursor.results.len()
                );
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!("Search '{}' page {} failed: {}", query, page, e);
                inner.state.error = Some(format!("{} {}", SEARCH_ERROR_PREFIX, e));
                FetchOutcome::Failed
            }
        }
    }
}

#[async_trait]
impl ScopedView for SearchOrchestrator {
    fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    async fn reset(&self) {
        SearchOrchestrator::reset(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ViewScope;
    use crate::testing::{page_of, FakeSource};
    use movie_explorer_sources::ApiError;

    fn orchestrator(source: FakeSource) -> (Arc<FakeSource>, Arc<SearchOrchestrator>) {
        let source = Arc::new(source);
        let orchestrator = Arc::new(SearchOrchestrator::new(source.clone()));
        (source, orchestrator)
    }

    async fn wait_for_call(source: &FakeSource, call: &str) {
        while !source.was_called(call) {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_batman_load_more_accumulates() {
        let (_source, search) = orchestrator(
            FakeSource::new()
                .with_search("batman", 1, page_of(1, 3, 0..20))
                .with_search("batman", 2, page_of(2, 3, 20..40)),
        );

        assert_eq!(search.search("batman", 1).await, FetchOutcome::Applied);
        let state = search.state().await;
        assert_eq!(state.results().len(), 20);
        assert_eq!((state.current_page(), state.total_pages()), (1, 3));
        assert!(state.has_more());

        assert_eq!(search.load_more().await, FetchOutcome::Applied);
        let state = search.state().await;
        assert_eq!(state.results().len(), 40);
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.results()[20].id, 20);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_page_one_clears_previous_results() {
        let (_source, search) = orchestrator(
            FakeSource::new()
                .with_search("batman", 1, page_of(1, 3, 0..20))
                .with_search("alien", 1, page_of(1, 1, 100..104)),
        );

        search.search("batman", 1).await;
        search.search("alien", 1).await;

        let state = search.state().await;
        assert_eq!(state.query, "alien");
        assert_eq!(state.results().len(), 4);
        assert!(!state.has_more());
    }

    #[tokio::test]
    async fn test_blank_query_sends_nothing() {
        let (source, search) = orchestrator(FakeSource::new().with_search("batman", 1, page_of(1, 3, 0..20)));
        search.search("batman", 1).await;

        assert_eq!(search.search("   ", 1).await, FetchOutcome::Ignored);
        let state = search.state().await;
        assert!(state.results().is_empty());
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(source.call_count("search"), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_keeps_prior_pages() {
        let (source, search) = orchestrator(FakeSource::new().with_search("batman", 1, page_of(1, 3, 0..20)));
        search.search("batman", 1).await;

        source.fail("search", ApiError::RateLimited);
        assert_eq!(search.load_more().await, FetchOutcome::Failed);

        let state = search.state().await;
        assert_eq!(
            state.error.as_deref(),
            Some("Sorry, there was a problem with your search. You have exceeded your rate limit. Please try again later.")
        );
        assert_eq!(state.results().len(), 20);
        assert_eq!(state.current_page(), 1);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_retry_reissues_failed_page() {
        let (source, search) = orchestrator(
            FakeSource::new()
                .with_search("batman", 1, page_of(1, 3, 0..20))
                .with_search("batman", 2, page_of(2, 3, 20..40)),
        );
        search.search("batman", 1).await;
        source.fail("search", ApiError::Network);
        search.load_more().await;

        source.clear_failure("search");
        assert_eq!(search.retry().await, FetchOutcome::Applied);
        let state = search.state().await;
        assert_eq!(state.results().len(), 40);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_retry_after_success_is_ignored() {
        let (source, search) = orchestrator(
            FakeSource::new()
                .with_search("batman", 1, page_of(1, 3, 0..20))
                .with_search("batman", 2, page_of(2, 3, 20..40)),
        );
        search.search("batman", 1).await;
        search.load_more().await;

        assert_eq!(search.retry().await, FetchOutcome::Ignored);
        let state = search.state().await;
        assert_eq!(state.results().len(), 40);
        assert_eq!(state.current_page(), 2);
        assert_eq!(source.call_count("search:batman:2"), 1);
    }

    #[tokio::test]
    async fn test_blank_query_stops_load_more() {
        let (source, search) = orchestrator(
            FakeSource::new()
                .with_search("batman", 1, page_of(1, 3, 0..20))
                .with_search("batman", 2, page_of(2, 3, 20..40)),
        );
        search.search("batman", 1).await;
        search.search("  ", 1).await;

        let state = search.state().await;
        assert!(!state.has_more());
        assert_eq!(state.current_page(), 1);

        assert_eq!(search.load_more().await, FetchOutcome::Ignored);
        assert!(search.state().await.results().is_empty());
        assert!(!source.was_called("search:batman:2"));
    }

    #[tokio::test]
    async fn test_load_more_ignored_without_more_pages() {
        let (source, search) = orchestrator(FakeSource::new().with_search("alien", 1, page_of(1, 1, 0..3)));
        assert_eq!(search.load_more().await, FetchOutcome::Ignored);

        search.search("alien", 1).await;
        assert_eq!(search.load_more().await, FetchOutcome::Ignored);
        assert_eq!(source.call_count("search"), 1);
    }

    #[tokio::test]
    async fn test_load_more_ignored_while_loading() {
        let (source, search) = orchestrator(
            FakeSource::new()
                .with_search("batman", 1, page_of(1, 3, 0..20))
                .with_search("batman", 2, page_of(2, 3, 20..40)),
        );
        search.search("batman", 1).await;

        let gate = source.gate("search:batman:2");
        let background = search.clone();
        let pending = tokio::spawn(async move { background.load_more().await });
        wait_for_call(&source, "search:batman:2").await;

        assert_eq!(search.load_more().await, FetchOutcome::Ignored);
        gate.notify_one();
        assert_eq!(pending.await.unwrap(), FetchOutcome::Applied);
        assert_eq!(search.state().await.results().len(), 40);
    }

    #[tokio::test]
    async fn test_newer_query_supersedes_in_flight() {
        let (source, search) = orchestrator(
            FakeSource::new()
                .with_search("alien", 1, page_of(1, 1, 100..105))
                .with_search("batman", 1, page_of(1, 3, 0..20)),
        );
        let gate = source.gate("search:alien:1");

        let background = search.clone();
        let first = tokio::spawn(async move { background.search("alien", 1).await });
        wait_for_call(&source, "search:alien:1").await;

        assert_eq!(search.search("batman", 1).await, FetchOutcome::Applied);
        gate.notify_one();
        assert_eq!(first.await.unwrap(), FetchOutcome::Stale);

        let state = search.state().await;
        assert_eq!(state.query, "batman");
        assert_eq!(state.results().len(), 20);
    }

    #[tokio::test]
    async fn test_reset_discards_in_flight() {
        let (source, search) = orchestrator(FakeSource::new().with_search("batman", 1, page_of(1, 3, 0..20)));
        let gate = source.gate("search:batman:1");

        let background = search.clone();
        let pending = tokio::spawn(async move { background.search("batman", 1).await });
        wait_for_call(&source, "search:batman:1").await;

        search.reset().await;
        gate.notify_one();
        assert_eq!(pending.await.unwrap(), FetchOutcome::Stale);
        assert_eq!(search.state().await, SearchState::default());
    }

    #[tokio::test]
    async fn test_closed_scope_discards_completion() {
        let (source, search) = orchestrator(FakeSource::new().with_search("batman", 1, page_of(1, 3, 0..20)));
        let gate = source.gate("search:batman:1");
        let scope = ViewScope::new(search.clone());

        let background = search.clone();
        let pending = tokio::spawn(async move { background.search("batman", 1).await });
        wait_for_call(&source, "search:batman:1").await;

        scope.close().await;
        gate.notify_one();
        assert_eq!(pending.await.unwrap(), FetchOutcome::Stale);
        assert!(search.state().await.results().is_empty());
    }

    #[tokio::test]
    async fn test_advanced_query_uses_discover() {
        let (source, search) = orchestrator(FakeSource::new().with_discover(1, page_of(1, 2, 0..20)));
        search
            .set_genres(vec![Genre {
                id: 28,
                name: "Action".into(),
            }])
            .await;

        assert_eq!(search.search("genre:Action", 1).await, FetchOutcome::Applied);
        let options = source.last_discover().unwrap();
        assert_eq!(options.with_genres.as_deref(), Some("28"));
        assert_eq!(options.page, Some(1));
        assert_eq!(source.call_count("search"), 0);
        assert_eq!(search.state().await.query, "genre:Action");
    }
}
