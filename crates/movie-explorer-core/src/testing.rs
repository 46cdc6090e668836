//! Scripted `MovieSource` for orchestrator tests.

use async_trait::async_trait;
use movie_explorer_models::{
    CollectionDetails, Credits, DiscoverOptions, Genre, Movie, MovieDetails, MoviesPage, TimeWindow, Video,
};
use movie_explorer_sources::{ApiError, MovieSource};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::Notify;

pub fn movie(id: u64) -> Movie {
    Movie {
        id,
        title: format!("Movie {}", id),
        poster_path: Some(format!("/poster-{}.jpg", id)),
        backdrop_path: None,
        overview: String::new(),
        release_date: "2008-07-16".to_string(),
        vote_average: 7.5,
        vote_count: 100,
        popularity: 10.0,
        genre_ids: vec![28],
    }
}

pub fn page_of(page: u32, total_pages: u32, ids: Range<u64>) -> MoviesPage {
    let results: Vec<Movie> = ids.map(movie).collect();
    MoviesPage {
        page,
        total_results: results.len() as u32 * total_pages,
        results,
        total_pages,
    }
}

pub fn details(id: u64, collection: Option<u64>) -> MovieDetails {
    let json = serde_json::json!({
        "id": id,
        "title": format!("Movie {}", id),
        "runtime": 152,
        "genres": [{"id": 28, "name": "Action"}],
        "belongs_to_collection": collection.map(|c| serde_json::json!({"id": c, "name": "Saga"})),
    });
    serde_json::from_value(json).expect("valid details fixture")
}

/// Responses are looked up by endpoint; anything unscripted returns an empty
/// page. `fail` makes every call to an endpoint return the given error and
/// `gate` holds a call until the returned `Notify` is signalled.
#[derive(Default)]
pub struct FakeSource {
    search: Mutex<HashMap<(String, u32), MoviesPage>>,
    discover: Mutex<HashMap<u32, MoviesPage>>,
    listings: Mutex<HashMap<&'static str, MoviesPage>>,
    genres: Mutex<Vec<Genre>>,
    details: Mutex<HashMap<u64, MovieDetails>>,
    videos: Mutex<Vec<Video>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
    discover_calls: Mutex<Vec<DiscoverOptions>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, query: &str, page: u32, response: MoviesPage) -> Self {
        self.search.lock().insert((query.to_string(), page), response);
        self
    }

    pub fn with_discover(self, page: u32, response: MoviesPage) -> Self {
        self.discover.lock().insert(page, response);
        self
    }

    pub fn with_listing(self, endpoint: &'static str, response: MoviesPage) -> Self {
        self.listings.lock().insert(endpoint, response);
        self
    }

    pub fn with_genres(self, genres: Vec<Genre>) -> Self {
        *self.genres.lock() = genres;
        self
    }

    pub fn with_details(self, details: MovieDetails) -> Self {
        self.details.lock().insert(details.id, details);
        self
    }

    pub fn with_videos(self, videos: Vec<Video>) -> Self {
        *self.videos.lock() = videos;
        self
    }

    pub fn fail(&self, endpoint: &'static str, error: ApiError) {
        self.failures.lock().insert(endpoint, error);
    }

    pub fn clear_failure(&self, endpoint: &'static str) {
        self.failures.lock().remove(endpoint);
    }

    pub fn gate(&self, call: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().insert(call.to_string(), notify.clone());
        notify
    }

    pub fn was_called(&self, call: &str) -> bool {
        self.calls.lock().iter().any(|c| c == call)
    }

    /// Calls to an endpoint, whatever their arguments
    pub fn call_count(&self, endpoint: &str) -> usize {
        let prefix = format!("{}:", endpoint);
        self.calls
            .lock()
            .iter()
            .filter(|c| *c == endpoint || c.starts_with(&prefix))
            .count()
    }

    pub fn last_discover(&self) -> Option<DiscoverOptions> {
        self.discover_calls.lock().last().cloned()
    }

    async fn enter(&self, endpoint: &'static str, call: String) -> Result<(), ApiError> {
        self.calls.lock().push(call.clone());
        let gate = self.gates.lock().get(&call).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.failures.lock().get(endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn listing(&self, endpoint: &'static str) -> MoviesPage {
        self.listings
            .lock()
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| MoviesPage::single(Vec::new()))
    }
}

#[async_trait]
impl MovieSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn popular(&self, page: u32) -> Result<MoviesPage, ApiError> {
        self.enter("popular", format!("popular:{}", page)).await?;
        Ok(self.listing("popular"))
    }

    async fn top_rated(&self, page: u32) -> Result<MoviesPage, ApiError> {
        self.enter("top_rated", format!("top_rated:{}", page)).await?;
        Ok(self.listing("top_rated"))
    }

    async fn upcoming(&self, page: u32) -> Result<MoviesPage, ApiError> {
        self.enter("upcoming", format!("upcoming:{}", page)).await?;
        Ok(self.listing("upcoming"))
    }

    async fn now_playing(&self, page: u32) -> Result<MoviesPage, ApiError> {
        self.enter("now_playing", format!("now_playing:{}", page)).await?;
        Ok(self.listing("now_playing"))
    }

    async fn trending(&self, window: TimeWindow) -> Result<MoviesPage, ApiError> {
        self.enter("trending", format!("trending:{}", window.as_str())).await?;
        Ok(self.listing("trending"))
    }

    async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        self.enter("genres", "genres".to_string()).await?;
        Ok(self.genres.lock().clone())
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviesPage, ApiError> {
        self.enter("search", format!("search:{}:{}", query, page)).await?;
        Ok(self
            .search
            .lock()
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or_else(|| MoviesPage::single(Vec::new())))
    }

    async fn discover(&self, options: &DiscoverOptions) -> Result<MoviesPage, ApiError> {
        let page = options.page_or_first();
        self.discover_calls.lock().push(options.clone());
        self.enter("discover", format!("discover:{}", page)).await?;
        Ok(self
            .discover
            .lock()
            .get(&page)
            .cloned()
            .unwrap_or_else(|| MoviesPage::single(Vec::new())))
    }

    async fn details(&self, movie_id: u64) -> Result<MovieDetails, ApiError> {
        self.enter("details", format!("details:{}", movie_id)).await?;
        self.details.lock().get(&movie_id).cloned().ok_or(ApiError::NotFound)
    }

    async fn credits(&self, movie_id: u64) -> Result<Credits, ApiError> {
        self.enter("credits", format!("credits:{}", movie_id)).await?;
        Ok(Credits {
            id: movie_id,
            cast: Vec::new(),
            crew: Vec::new(),
        })
    }

    async fn videos(&self, movie_id: u64) -> Result<Vec<Video>, ApiError> {
        self.enter("videos", format!("videos:{}", movie_id)).await?;
        Ok(self.videos.lock().clone())
    }

    async fn similar(&self, movie_id: u64, page: u32) -> Result<MoviesPage, ApiError> {
        self.enter("similar", format!("similar:{}:{}", movie_id, page)).await?;
        Ok(self.listing("similar"))
    }

    async fn recommendations(&self, movie_id: u64, page: u32) -> Result<MoviesPage, ApiError> {
        self.enter("recommendations", format!("recommendations:{}:{}", movie_id, page))
            .await?;
        Ok(self.listing("recommendations"))
    }

    async fn collection(&self, collection_id: u64) -> Result<CollectionDetails, ApiError> {
        self.enter("collection", format!("collection:{}", collection_id)).await?;
        Ok(CollectionDetails {
            id: collection_id,
            name: "Saga".to_string(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            parts: vec![movie(collection_id * 10)],
        })
    }
}
