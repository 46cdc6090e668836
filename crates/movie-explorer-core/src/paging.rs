use movie_explorer_models::{Movie, MoviesPage};

/// What became of one submitted fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was merged into the state
    Applied,
    /// The request failed and the state now carries its error
    Failed,
    /// Nothing was requested (blank query, already loading, no more pages)
    Ignored,
    /// A newer request or a reset superseded this one; its response was dropped
    Stale,
}

impl FetchOutcome {
    pub fn is_applied(self) -> bool {
        self == FetchOutcome::Applied
    }
}

/// Accumulated pages of one listing
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    pub current_page: u32,
    pub total_pages: u32,
    pub results: Vec<Movie>,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            results: Vec::new(),
        }
    }
}

impl PageCursor {
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn next_page(&self) -> u32 {
        self.current_page + 1
    }

    pub fn restart(&mut self) {
        *self = Self::default();
    }

    /// Page 1 replaces the results, later pages append in arrival order
    pub fn merge(&mut self, page: u32, response: MoviesPage) {
        if page <= 1 {
            self.results = response.results;
        } else {
            self.results.extend(response.results);
        }
        self.current_page = page.max(1);
        self.total_pages = response.total_pages.max(self.current_page);
    }
}
