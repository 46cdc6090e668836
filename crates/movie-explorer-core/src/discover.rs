use crate::paging::{FetchOutcome, PageCursor};
use crate::scope::ScopedView;
use async_trait::async_trait;
use movie_explorer_models::{DiscoverOptions, Movie};
use movie_explorer_sources::MovieSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const DISCOVER_ERROR_PREFIX: &str = "Sorry, there was a problem loading movies.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverState {
    /// Filters of the last submission, replayed by `load_more`
    pub options: DiscoverOptions,
    pub cursor: PageCursor,
    pub loading: bool,
    pub error: Option<String>,
}

impl DiscoverState {
    pub fn results(&self) -> &[Movie] {
        &self.cursor.results
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }
}

/// Filtered browsing with "load more" pagination. Shares the generation
/// scheme of the search orchestrator.
pub struct DiscoverOrchestrator {
    source: Arc<dyn MovieSource>,
    generation: AtomicU64,
    state: RwLock<DiscoverState>,
}

impl DiscoverOrchestrator {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
            state: RwLock::new(DiscoverState::default()),
        }
    }

    pub async fn state(&self) -> DiscoverState {
        self.state.read().await.clone()
    }

    /// Fetch with `options`. Resetting starts over at page 1, otherwise the
    /// page after the current one is appended.
    pub async fn discover(&self, options: DiscoverOptions, reset_results: bool) -> FetchOutcome {
        let (generation, request) = {
            let mut state = self.state.write().await;
            self.begin(&mut state, options, reset_results)
        };
        self.complete(generation, request).await
    }

    pub async fn load_more(&self) -> FetchOutcome {
        let (generation, request) = {
            let mut state = self.state.write().await;
            if state.loading || !state.has_more() {
                debug!("Discover load more ignored");
                return FetchOutcome::Ignored;
            }
            let options = state.options.clone();
            self.begin(&mut state, options, false)
        };
        self.complete(generation, request).await
    }

    /// Re-issue the last request after a failure
    pub async fn retry(&self) -> FetchOutcome {
        let (generation, request) = {
            let mut state = self.state.write().await;
            if state.loading || state.error.is_none() {
                return FetchOutcome::Ignored;
            }
            let options = state.options.clone();
            // A failed first page restarts; a failed later page is fetched again
            let reset = state.cursor.results.is_empty();
            self.begin(&mut state, options, reset)
        };
        self.complete(generation, request).await
    }

    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        self.invalidate();
        *state = DiscoverState::default();
        debug!("Discover state reset");
    }

    fn begin(&self, state: &mut DiscoverState, options: DiscoverOptions, reset_results: bool) -> (u64, DiscoverOptions) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let page = if reset_results { 1 } else { state.cursor.next_page() };

        state.loading = true;
        state.error = None;
        state.options = options.clone();
        if reset_results {
            state.cursor.restart();
        }

        debug!("Discovering page {} (generation {})", page, generation);
        (generation, options.with_page(page))
    }

    async fn complete(&self, generation: u64, request: DiscoverOptions) -> FetchOutcome {
        let page = request.page_or_first();
        let result = self.source.discover(&request).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale discover result for page {}", page);
            return FetchOutcome::Stale;
        }
        state.loading = false;

        match result {
            Ok(response) => {
                state.cursor.merge(page, response);
                info!(
                    "Discover: page {}/{} ({} results)",
                    state.cursor.current_page,
                    state.cursor.total_pages,
                    state.cursor.results.len()
                );
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!("Discover page {} failed: {}", page, e);
                state.error = Some(format!("{} {}", DISCOVER_ERROR_PREFIX, e));
                FetchOutcome::Failed
            }
        }
    }
}

#[async_trait]
impl ScopedView for DiscoverOrchestrator {
    fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    async fn reset(&self) {
        DiscoverOrchestrator::reset(self).await
    }
}
