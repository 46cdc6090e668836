use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filters for the discovery endpoint.
///
/// Every field maps to one query parameter of the metadata API:
///
/// | field | parameter |
/// |---|---|
/// | `page` | `page` (defaults to 1) |
/// | `sort_by` | `sort_by` |
/// | `with_genres` | `with_genres` (comma-separated genre ids) |
/// | `vote_average_gte` / `vote_average_lte` | `vote_average.gte` / `vote_average.lte` |
/// | `release_date_gte` / `release_date_lte` | `primary_release_date.gte` / `primary_release_date.lte` |
/// | `with_original_language` | `with_original_language` (ISO 639-1) |
/// | `year` | `year` |
/// | `include_adult` | `include_adult` (sent as `false` when unset) |
/// | `with_keywords` | `with_keywords` |
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiscoverOptions {
    pub page: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub with_genres: Option<String>,
    pub vote_average_gte: Option<f64>,
    pub vote_average_lte: Option<f64>,
    pub release_date_gte: Option<String>,
    pub release_date_lte: Option<String>,
    pub with_original_language: Option<String>,
    pub year: Option<u32>,
    pub include_adult: Option<bool>,
    pub with_keywords: Option<String>,
}

impl DiscoverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn with_genre(mut self, genre_id: u32) -> Self {
        self.with_genres = Some(genre_id.to_string());
        self
    }

    /// Restrict release dates to the calendar year `year`
    pub fn with_release_year(mut self, year: u32) -> Self {
        self.release_date_gte = Some(format!("{year}-01-01"));
        self.release_date_lte = Some(format!("{year}-12-31"));
        self
    }

    pub fn with_rating_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.vote_average_gte = min;
        self.vote_average_lte = max;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.with_original_language = Some(language.into());
        self
    }

    /// The page this request targets, 1 when unset
    pub fn page_or_first(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// True when no filter beyond pagination is set
    pub fn is_unfiltered(&self) -> bool {
        Self {
            page: None,
            ..self.clone()
        } == Self::default()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "popularity.asc")]
    PopularityAsc,
    #[serde(rename = "vote_average.desc")]
    VoteAverageDesc,
    #[serde(rename = "vote_average.asc")]
    VoteAverageAsc,
    #[serde(rename = "primary_release_date.desc")]
    ReleaseDateDesc,
    #[serde(rename = "primary_release_date.asc")]
    ReleaseDateAsc,
    #[serde(rename = "revenue.desc")]
    RevenueDesc,
    #[serde(rename = "revenue.asc")]
    RevenueAsc,
    #[serde(rename = "title.asc")]
    TitleAsc,
    #[serde(rename = "title.desc")]
    TitleDesc,
}

impl SortBy {
    pub const ALL: [SortBy; 10] = [
        SortBy::PopularityDesc,
        SortBy::PopularityAsc,
        SortBy::VoteAverageDesc,
        SortBy::VoteAverageAsc,
        SortBy::ReleaseDateDesc,
        SortBy::ReleaseDateAsc,
        SortBy::RevenueDesc,
        SortBy::RevenueAsc,
        SortBy::TitleAsc,
        SortBy::TitleDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::PopularityDesc => "popularity.desc",
            SortBy::PopularityAsc => "popularity.asc",
            SortBy::VoteAverageDesc => "vote_average.desc",
            SortBy::VoteAverageAsc => "vote_average.asc",
            SortBy::ReleaseDateDesc => "primary_release_date.desc",
            SortBy::ReleaseDateAsc => "primary_release_date.asc",
            SortBy::RevenueDesc => "revenue.desc",
            SortBy::RevenueAsc => "revenue.asc",
            SortBy::TitleAsc => "title.asc",
            SortBy::TitleDesc => "title.desc",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == wanted)
            .ok_or_else(|| format!("Invalid sort order: {}", s))
    }
}

/// Window for the trending endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            other => Err(format!("Invalid time window: {}. Use 'day' or 'week'", other)),
        }
    }
}

/// Fixed movie listings exposed by the metadata API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovieCategory {
    #[default]
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
}

impl MovieCategory {
    /// Resolve a category name, falling back to `Popular` for anything unknown
    pub fn from_endpoint(endpoint: &str) -> Self {
        Self::parse(endpoint).unwrap_or_default()
    }

    pub fn parse(endpoint: &str) -> Option<Self> {
        match endpoint.trim() {
            "popular" => Some(MovieCategory::Popular),
            "top_rated" => Some(MovieCategory::TopRated),
            "upcoming" => Some(MovieCategory::Upcoming),
            "now_playing" => Some(MovieCategory::NowPlaying),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovieCategory::Popular => "popular",
            MovieCategory::TopRated => "top_rated",
            MovieCategory::Upcoming => "upcoming",
            MovieCategory::NowPlaying => "now_playing",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MovieCategory::Popular => "Popular Movies",
            MovieCategory::TopRated => "Top Rated Movies",
            MovieCategory::Upcoming => "Upcoming Movies",
            MovieCategory::NowPlaying => "Now Playing Movies",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_year_bounds() {
        let options = DiscoverOptions::new().with_release_year(1999);
        assert_eq!(options.release_date_gte.as_deref(), Some("1999-01-01"));
        assert_eq!(options.release_date_lte.as_deref(), Some("1999-12-31"));
    }

    #[test]
    fn test_is_unfiltered_ignores_page() {
        assert!(DiscoverOptions::new().with_page(4).is_unfiltered());
        assert!(!DiscoverOptions::new().with_genre(28).is_unfiltered());
    }

    #[test]
    fn test_sort_by_round_trips_through_str() {
        for sort in SortBy::ALL {
            assert_eq!(sort.as_str().parse::<SortBy>().unwrap(), sort);
        }
        assert!("sideways".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_category_falls_back_to_popular() {
        assert_eq!(MovieCategory::from_endpoint("top_rated"), MovieCategory::TopRated);
        assert_eq!(MovieCategory::from_endpoint("latest"), MovieCategory::Popular);
    }
}
