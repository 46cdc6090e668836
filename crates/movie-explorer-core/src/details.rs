use movie_explorer_models::{pick_trailer, CollectionDetails, Credits, Movie, MovieDetails, Video};
use movie_explorer_sources::{ApiError, MovieSource};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
#[error("Error loading movie details. Please try again.")]
pub struct DetailsError {
    #[source]
    pub source: ApiError,
}

/// Everything the detail view shows for one movie
#[derive(Debug, Clone, PartialEq)]
pub struct MovieView {
    pub details: MovieDetails,
    pub credits: Credits,
    pub videos: Vec<Video>,
    pub similar: Vec<Movie>,
    pub recommendations: Vec<Movie>,
    pub collection: Option<CollectionDetails>,
}

impl MovieView {
    pub fn trailer(&self) -> Option<&Video> {
        pick_trailer(&self.videos)
    }

    pub fn directors(&self) -> Vec<&str> {
        self.credits.crew_with_job("Director")
    }
}

/// Fetches detail data on demand. Nothing is cached; each view loads afresh.
pub struct MovieDetailsLoader {
    source: Arc<dyn MovieSource>,
}

impl MovieDetailsLoader {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self { source }
    }

    pub async fn load(&self, movie_id: u64) -> Result<MovieDetails, DetailsError> {
        self.source.details(movie_id).await.map_err(|source| {
            warn!("Error fetching movie details for {}: {}", movie_id, source);
            DetailsError { source }
        })
    }

    pub async fn load_full(&self, movie_id: u64) -> Result<MovieView, DetailsError> {
        let result = futures::try_join!(
            self.source.details(movie_id),
            self.source.credits(movie_id),
            self.source.videos(movie_id),
            self.source.similar(movie_id, 1),
            self.source.recommendations(movie_id, 1),
        );
        let (details, credits, videos, similar, recommendations) = result.map_err(|source| {
            warn!("Error fetching movie view for {}: {}", movie_id, source);
            DetailsError { source }
        })?;

        let collection = match &details.belongs_to_collection {
            Some(reference) => match self.source.collection(reference.id).await {
                Ok(collection) => Some(collection),
                Err(e) => {
                    // the rest of the view is still worth showing
                    warn!("Error fetching collection {}: {}", reference.id, e);
                    None
                }
            },
            None => None,
        };

        Ok(MovieView {
            details,
            credits,
            videos,
            similar: similar.results,
            recommendations: recommendations.results,
            collection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{details, page_of, FakeSource};

    fn trailer(key: &str, official: bool) -> Video {
        Video {
            id: key.to_string(),
            key: key.to_string(),
            name: key.to_string(),
            site: "YouTube".to_string(),
            size: 1080,
            video_type: "Trailer".to_string(),
            official,
            published_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_load_full_with_collection() {
        let source = Arc::new(
            FakeSource::new()
                .with_details(details(155, Some(263)))
                .with_listing("similar", page_of(1, 1, 1..4))
                .with_videos(vec![trailer("fan", false), trailer("official", true)]),
        );
        let loader = MovieDetailsLoader::new(source);

        let view = loader.load_full(155).await.unwrap();
        assert_eq!(view.details.runtime, Some(152));
        assert_eq!(view.similar.len(), 3);
        assert_eq!(view.collection.as_ref().map(|c| c.id), Some(263));
        assert_eq!(view.trailer().map(|v| v.key.as_str()), Some("official"));
    }

    #[tokio::test]
    async fn test_missing_collection_is_skipped() {
        let source = Arc::new(FakeSource::new().with_details(details(603, None)));
        let view = MovieDetailsLoader::new(source.clone()).load_full(603).await.unwrap();
        assert_eq!(view.collection, None);
        assert_eq!(source.call_count("collection"), 0);
    }

    #[tokio::test]
    async fn test_error_message() {
        let source = Arc::new(FakeSource::new());
        let err = MovieDetailsLoader::new(source).load(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Error loading movie details. Please try again.");
        assert_eq!(err.source, ApiError::NotFound);
    }
}
