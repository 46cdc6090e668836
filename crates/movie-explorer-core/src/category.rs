use movie_explorer_models::{MovieCategory, MoviesPage};
use movie_explorer_sources::{ApiError, MovieSource};
use std::sync::Arc;
use tracing::warn;

/// One page of a fixed listing by its endpoint name
pub struct CategoryLister {
    source: Arc<dyn MovieSource>,
}

impl CategoryLister {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self { source }
    }

    /// Resolve a category name, logging when it falls back to `popular`
    pub fn resolve(name: &str) -> MovieCategory {
        MovieCategory::parse(name).unwrap_or_else(|| {
            warn!("Unknown category '{}', showing popular movies", name);
            MovieCategory::Popular
        })
    }

    pub async fn list(&self, name: &str, page: u32) -> Result<(MovieCategory, MoviesPage), ApiError> {
        let category = Self::resolve(name);
        let response = self.source.by_category(category, page.max(1)).await?;
        Ok((category, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_of, FakeSource};

    #[tokio::test]
    async fn test_known_category() {
        let source = Arc::new(FakeSource::new().with_listing("top_rated", page_of(2, 9, 0..20)));
        let lister = CategoryLister::new(source.clone());

        let (category, page) = lister.list("top_rated", 2).await.unwrap();
        assert_eq!(category, MovieCategory::TopRated);
        assert_eq!(page.total_pages, 9);
        assert!(source.was_called("top_rated:2"));
    }

    #[tokio::test]
    async fn test_unknown_category_falls_back_to_popular() {
        let source = Arc::new(FakeSource::new());
        let lister = CategoryLister::new(source.clone());

        let (category, _) = lister.list("latest", 0).await.unwrap();
        assert_eq!(category, MovieCategory::Popular);
        assert!(source.was_called("popular:1"));
    }
}
