use movie_explorer_models::{Genre, Movie, TimeWindow};
use movie_explorer_sources::{ApiError, MovieSource};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub const CATALOG_ERROR: &str = "Error fetching movie data. Please try again later.";

/// Startup collections shown on the home view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub popular: Vec<Movie>,
    pub trending: Vec<Movie>,
    pub upcoming: Vec<Movie>,
    pub genres: Vec<Genre>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct CatalogFetcher {
    source: Arc<dyn MovieSource>,
    snapshot: RwLock<CatalogSnapshot>,
}

impl CatalogFetcher {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(CatalogSnapshot::default()),
        }
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn genres(&self) -> Vec<Genre> {
        self.snapshot.read().await.genres.clone()
    }

    /// Fetch popular, weekly trending, upcoming and the genre table together.
    /// One failure fails the whole load and leaves every collection empty.
    pub async fn load(&self) -> Result<(), ApiError> {
        {
            let mut snapshot = self.snapshot.write().await;
            snapshot.loading = true;
            snapshot.error = None;
        }

        let result = futures::try_join!(
            self.source.popular(1),
            self.source.trending(TimeWindow::Week),
            self.source.upcoming(1),
            self.source.genres(),
        );

        let mut snapshot = self.snapshot.write().await;
        snapshot.loading = false;
        match result {
            Ok((popular, trending, upcoming, genres)) => {
                snapshot.popular = popular.results;
                snapshot.trending = trending.results;
                snapshot.upcoming = upcoming.results;
                snapshot.genres = genres;
                info!(
                    "Catalog loaded: {} popular, {} trending, {} upcoming, {} genres",
                    snapshot.popular.len(),
                    snapshot.trending.len(),
                    snapshot.upcoming.len(),
                    snapshot.genres.len()
                );
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching movie data: {}", e);
                snapshot.popular.clear();
                snapshot.trending.clear();
                snapshot.upcoming.clear();
                snapshot.genres.clear();
                snapshot.error = Some(CATALOG_ERROR.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_of, FakeSource};

    fn source() -> FakeSource {
        FakeSource::new()
            .with_listing("popular", page_of(1, 500, 0..20))
            .with_listing("trending", page_of(1, 50, 100..120))
            .with_listing("upcoming", page_of(1, 10, 200..210))
            .with_genres(vec![Genre {
                id: 28,
                name: "Action".into(),
            }])
    }

    #[tokio::test]
    async fn test_load_fills_all_collections() {
        let source = Arc::new(source());
        let catalog = CatalogFetcher::new(source.clone());
        catalog.load().await.unwrap();

        let snapshot = catalog.snapshot().await;
        assert_eq!(snapshot.popular.len(), 20);
        assert_eq!(snapshot.trending[0].id, 100);
        assert_eq!(snapshot.upcoming.len(), 10);
        assert_eq!(catalog.genres().await[0].name, "Action");
        assert!(!snapshot.loading);
        assert!(source.was_called("trending:week"));
    }

    #[tokio::test]
    async fn test_any_failure_fails_the_group() {
        let source = Arc::new(source());
        source.fail("upcoming", ApiError::Unauthorized);
        let catalog = CatalogFetcher::new(source);

        assert_eq!(catalog.load().await, Err(ApiError::Unauthorized));
        let snapshot = catalog.snapshot().await;
        assert_eq!(snapshot.error.as_deref(), Some(CATALOG_ERROR));
        assert!(snapshot.popular.is_empty());
        assert!(snapshot.genres.is_empty());
        assert!(!snapshot.loading);
    }
}
