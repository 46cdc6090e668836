//! Endpoint paths, query parameters and body parsing for the TMDB v3 API.
//! Nothing here touches the network.

use movie_explorer_models::{DiscoverOptions, MovieCategory, MoviesPage, TimeWindow};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

pub type Params = Vec<(&'static str, String)>;

pub fn category_path(category: MovieCategory) -> String {
    format!("/movie/{}", category.as_str())
}

pub fn trending_path(window: TimeWindow) -> String {
    format!("/trending/movie/{}", window.as_str())
}

pub fn movie_path(movie_id: u64, sub: Option<&str>) -> String {
    match sub {
        Some(sub) => format!("/movie/{}/{}", movie_id, sub),
        None => format!("/movie/{}", movie_id),
    }
}

pub fn collection_path(collection_id: u64) -> String {
    format!("/collection/{}", collection_id)
}

pub const GENRES_PATH: &str = "/genre/movie/list";
pub const SEARCH_PATH: &str = "/search/movie";
pub const DISCOVER_PATH: &str = "/discover/movie";

pub fn page_params(page: u32) -> Params {
    vec![("page", page.max(1).to_string())]
}

pub fn search_params(query: &str, page: u32) -> Params {
    vec![
        ("query", query.to_string()),
        ("page", page.max(1).to_string()),
        ("include_adult", "false".to_string()),
    ]
}

/// Query parameters for `/discover/movie`. Unset filters are omitted, except
/// `include_adult` which is always sent.
pub fn discover_params(options: &DiscoverOptions) -> Params {
    let mut params: Params = vec![("page", options.page_or_first().to_string())];

    if let Some(sort_by) = options.sort_by {
        params.push(("sort_by", sort_by.as_str().to_string()));
    }
    if let Some(genres) = options.with_genres.as_ref().filter(|g| !g.is_empty()) {
        params.push(("with_genres", genres.clone()));
    }
    if let Some(min) = options.vote_average_gte {
        params.push(("vote_average.gte", min.to_string()));
    }
    if let Some(max) = options.vote_average_lte {
        params.push(("vote_average.lte", max.to_string()));
    }
    if let Some(from) = options.release_date_gte.as_ref().filter(|d| !d.is_empty()) {
        params.push(("primary_release_date.gte", from.clone()));
    }
    if let Some(to) = options.release_date_lte.as_ref().filter(|d| !d.is_empty()) {
        params.push(("primary_release_date.lte", to.clone()));
    }
    if let Some(language) = options.with_original_language.as_ref().filter(|l| !l.is_empty()) {
        params.push(("with_original_language", language.clone()));
    }
    if let Some(year) = options.year {
        params.push(("year", year.to_string()));
    }
    params.push(("include_adult", options.include_adult.unwrap_or(false).to_string()));
    if let Some(keywords) = options.with_keywords.as_ref().filter(|k| !k.is_empty()) {
        params.push(("with_keywords", keywords.clone()));
    }

    params
}

pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))
}

/// Search and discover results must carry a `results` array even on HTTP 200
pub fn parse_search_body(body: &str) -> Result<MoviesPage, ApiError> {
    let value: Value = parse_body(body)?;
    if !value.get("results").map(Value::is_array).unwrap_or(false) {
        return Err(ApiError::MalformedResponse);
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))
}
