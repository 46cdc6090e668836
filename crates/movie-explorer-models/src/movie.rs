use serde::{Deserialize, Serialize};

/// Movie summary as returned by every list endpoint of the metadata API.
///
/// Field names follow the API's snake_case shape so that stored collections
/// round-trip through local storage unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String, // yyyy-mm-dd, empty when unknown
    #[serde(default)]
    pub vote_average: f64, // 0-10
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    /// Release year parsed from `release_date`, if present
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .split('-')
            .next()
            .filter(|y| y.len() == 4)
            .and_then(|y| y.parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// One page of a paginated movie listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviesPage {
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<Movie>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl MoviesPage {
    pub fn single(results: Vec<Movie>) -> Self {
        let total_results = results.len() as u32;
        Self {
            page: 1,
            results,
            total_pages: 1,
            total_results,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

/// Reference to the franchise a movie belongs to (API "collection", not a
/// local watchlist/favorites collection)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// Full movie record fetched lazily for the detail view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>, // minutes
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub production_companies: Option<Vec<ProductionCompany>>,
    #[serde(default)]
    pub belongs_to_collection: Option<CollectionRef>,
}

impl MovieDetails {
    /// Summary view of this movie, suitable for storing in a collection
    pub fn summary(&self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            overview: self.overview.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            popularity: self.popularity,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserializes_with_missing_optional_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 603, "title": "The Matrix", "poster_path": null}"#).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.poster_path, None);
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_movie_year() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "x", "release_date": "1999-03-31"}"#).unwrap();
        assert_eq!(movie.year(), Some(1999));
    }

    #[test]
    fn test_details_summary_keeps_genre_ids() {
        let details: MovieDetails = serde_json::from_str(
            r#"{"id": 27205, "title": "Inception", "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}], "runtime": 148}"#,
        )
        .unwrap();
        let summary = details.summary();
        assert_eq!(summary.id, 27205);
        assert_eq!(summary.genre_ids, vec![28, 878]);
    }
}
