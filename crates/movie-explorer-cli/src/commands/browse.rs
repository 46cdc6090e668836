use super::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_explorer_core::catalog::CATALOG_ERROR;
use movie_explorer_core::{CatalogFetcher, CategoryLister};
use movie_explorer_models::{Movie, TimeWindow};
use serde_json::json;

fn head(movies: &[Movie], limit: usize) -> &[Movie] {
    &movies[..movies.len().min(limit)]
}

/// Home view: trending, popular and upcoming side by side
pub async fn run_home(ctx: &AppContext, limit: usize, output: &Output) -> Result<()> {
    let fetcher = CatalogFetcher::new(ctx.source()?);
    let loaded = {
        let _spinner = output.spinner("Loading movies...");
        fetcher.load().await
    };
    loaded.map_err(|e| eyre!("{} ({})", CATALOG_ERROR, e))?;

    let snapshot = fetcher.snapshot().await;
    if !output.is_human() {
        output.json(&json!({
            "trending": head(&snapshot.trending, limit),
            "popular": head(&snapshot.popular, limit),
            "upcoming": head(&snapshot.upcoming, limit),
            "genres": snapshot.genres,
        }));
        return Ok(());
    }

    output.heading("Trending This Week");
    output.movies("trending", head(&snapshot.trending, limit));
    output.heading("Popular Movies");
    output.movies("popular", head(&snapshot.popular, limit));
    output.heading("Upcoming Movies");
    output.movies("upcoming", head(&snapshot.upcoming, limit));
    output.info(format!("\n{} genres available", snapshot.genres.len()));
    Ok(())
}

pub async fn run_list(ctx: &AppContext, category: &str, page: u32, output: &Output) -> Result<()> {
    let lister = CategoryLister::new(ctx.source()?);
    let listed = {
        let _spinner = output.spinner(format!("Loading {}...", category));
        lister.list(category, page).await
    };
    let (category, movies) = listed?;

    if !output.is_human() {
        output.json(&json!({
            "category": category.as_str(),
            "page": movies.page,
            "total_pages": movies.total_pages,
            "results": movies.results,
        }));
        return Ok(());
    }

    output.heading(&format!("{} (page {} of {})", category.title(), movies.page, movies.total_pages));
    output.movies("results", &movies.results);
    Ok(())
}

pub async fn run_trending(ctx: &AppContext, window: TimeWindow, output: &Output) -> Result<()> {
    let source = ctx.source()?;
    let trending = {
        let _spinner = output.spinner("Loading trending movies...");
        source.trending(window).await
    }?;

    let title = match window {
        TimeWindow::Day => "Trending Today",
        TimeWindow::Week => "Trending This Week",
    };
    output.heading(title);
    output.movies("results", &trending.results);
    Ok(())
}
