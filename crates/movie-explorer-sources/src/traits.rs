use async_trait::async_trait;
use movie_explorer_models::{
    CollectionDetails, Credits, DiscoverOptions, Genre, MovieCategory, MovieDetails, MoviesPage, TimeWindow, Video,
};

use crate::error::ApiError;

/// Read-only access to a movie metadata catalog.
///
/// Orchestrators only talk to this trait; `TmdbClient` is the network
/// implementation.
#[async_trait]
pub trait MovieSource: Send + Sync {
    fn source_name(&self) -> &str;

    // Listings
    async fn popular(&self, page: u32) -> Result<MoviesPage, ApiError>;
    async fn top_rated(&self, page: u32) -> Result<MoviesPage, ApiError>;
    async fn upcoming(&self, page: u32) -> Result<MoviesPage, ApiError>;
    async fn now_playing(&self, page: u32) -> Result<MoviesPage, ApiError>;
    async fn trending(&self, window: TimeWindow) -> Result<MoviesPage, ApiError>;

    /// One page of a fixed listing
    async fn by_category(&self, category: MovieCategory, page: u32) -> Result<MoviesPage, ApiError> {
        match category {
            MovieCategory::Popular => self.popular(page).await,
            MovieCategory::TopRated => self.top_rated(page).await,
            MovieCategory::Upcoming => self.upcoming(page).await,
            MovieCategory::NowPlaying => self.now_playing(page).await,
        }
    }

    async fn genres(&self) -> Result<Vec<Genre>, ApiError>;

    // Lookup
    async fn search(&self, query: &str, page: u32) -> Result<MoviesPage, ApiError>;
    async fn discover(&self, options: &DiscoverOptions) -> Result<MoviesPage, ApiError>;

    // Per-movie
    async fn details(&self, movie_id: u64) -> Result<MovieDetails, ApiError>;
    async fn credits(&self, movie_id: u64) -> Result<Credits, ApiError>;
    async fn videos(&self, movie_id: u64) -> Result<Vec<Video>, ApiError>;
    async fn similar(&self, movie_id: u64, page: u32) -> Result<MoviesPage, ApiError>;
    async fn recommendations(&self, movie_id: u64, page: u32) -> Result<MoviesPage, ApiError>;
    async fn collection(&self, collection_id: u64) -> Result<CollectionDetails, ApiError>;
}
