use crate::error::ApiError;
use crate::tmdb::api::{self, Params};
use crate::traits::MovieSource;
use async_trait::async_trait;
use movie_explorer_config::ApiConfig;
use movie_explorer_models::{
    CollectionDetails, Credits, DiscoverOptions, Genre, GenreList, MovieCategory, MovieDetails, MoviesPage,
    TimeWindow, Video, VideoList,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    language: String,
    region: String,
    search_timeout: Duration,
}

impl TmdbClient {
    pub fn new(config: &ApiConfig, access_token: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", access_token.trim()))
            .map_err(|e| ApiError::Request(format!("Invalid access token: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            region: config.region.clone(),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
        })
    }

    async fn get_body(&self, path: &str, mut params: Params, searching: bool) -> Result<String, ApiError> {
        params.push(("language", self.language.clone()));
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", path, params);

        let mut request = self.client.get(&url).query(&params);
        if searching {
            request = request.timeout(self.search_timeout);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", path, e);
            ApiError::from_transport(&e, searching)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned {}", path, status);
            return Err(ApiError::from_status(status.as_u16()));
        }

        response.text().await.map_err(|e| ApiError::from_transport(&e, searching))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<T, ApiError> {
        let body = self.get_body(path, params, false).await?;
        api::parse_body(&body)
    }

    fn with_region(&self, mut params: Params) -> Params {
        params.push(("region", self.region.clone()));
        params
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn popular(&self, page: u32) -> Result<MoviesPage, ApiError> {
        self.get(&api::category_path(MovieCategory::Popular), api::page_params(page)).await
    }

    async fn top_rated(&self, page: u32) -> Result<MoviesPage, ApiError> {
        self.get(&api::category_path(MovieCategory::TopRated), api::page_params(page)).await
    }

    async fn upcoming(&self, page: u32) -> Result<MoviesPage, ApiError> {
        let params = self.with_region(api::page_params(page));
        self.get(&api::category_path(MovieCategory::Upcoming), params).await
    }

    async fn now_playing(&self, page: u32) -> Result<MoviesPage, ApiError> {
        self.get(&api::category_path(MovieCategory::NowPlaying), api::page_params(page)).await
    }

    async fn trending(&self, window: TimeWindow) -> Result<MoviesPage, ApiError> {
        self.get(&api::trending_path(window), Vec::new()).await
    }

    // Category listings are regional
    async fn by_category(&self, category: MovieCategory, page: u32) -> Result<MoviesPage, ApiError> {
        let params = self.with_region(api::page_params(page));
        self.get(&api::category_path(category), params).await
    }

    async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        let list: GenreList = self.get(api::GENRES_PATH, Vec::new()).await?;
        Ok(list.genres)
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviesPage, ApiError> {
        let body = self.get_body(api::SEARCH_PATH, api::search_params(query, page), true).await?;
        api::parse_search_body(&body)
    }

    async fn discover(&self, options: &DiscoverOptions) -> Result<MoviesPage, ApiError> {
        let body = self.get_body(api::DISCOVER_PATH, api::discover_params(options), false).await?;
        api::parse_search_body(&body)
    }

    async fn details(&self, movie_id: u64) -> Result<MovieDetails, ApiError> {
        self.get(&api::movie_path(movie_id, None), Vec::new()).await
    }

    async fn credits(&self, movie_id: u64) -> Result<Credits, ApiError> {
        self.get(&api::movie_path(movie_id, Some("credits")), Vec::new()).await
    }

    async fn videos(&self, movie_id: u64) -> Result<Vec<Video>, ApiError> {
        let list: VideoList = self.get(&api::movie_path(movie_id, Some("videos")), Vec::new()).await?;
        Ok(list.results)
    }

    async fn similar(&self, movie_id: u64, page: u32) -> Result<MoviesPage, ApiError> {
        self.get(&api::movie_path(movie_id, Some("similar")), api::page_params(page)).await
    }

    async fn recommendations(&self, movie_id: u64, page: u32) -> Result<MoviesPage, ApiError> {
        self.get(&api::movie_path(movie_id, Some("recommendations")), api::page_params(page)).await
    }

    async fn collection(&self, collection_id: u64) -> Result<CollectionDetails, ApiError> {
        self.get(&api::collection_path(collection_id), Vec::new()).await
    }
}
