use super::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_explorer_core::{DiscoverOrchestrator, DiscoverState, FetchOutcome, ViewScope};
use movie_explorer_models::{DiscoverOptions, Genre, SortBy};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct DiscoverArgs {
    /// Genre id or name
    pub genre: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub year: Option<u32>,
    pub language: Option<String>,
    pub sort: Option<SortBy>,
    pub include_adult: bool,
    pub pages: u32,
    pub retries: u32,
}

/// Genre id for a numeric id or a case-insensitive genre name
fn resolve_genre(input: &str, genres: &[Genre]) -> Option<u32> {
    let input = input.trim();
    if let Ok(id) = input.parse::<u32>() {
        return Some(id);
    }
    genres
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(input))
        .map(|g| g.id)
}

fn build_options(args: &DiscoverArgs, genre_id: Option<u32>) -> DiscoverOptions {
    let mut options = DiscoverOptions::new().with_rating_range(args.min_rating, args.max_rating);
    if let Some(id) = genre_id {
        options = options.with_genre(id);
    }
    if let Some(year) = args.year {
        options = options.with_release_year(year);
    }
    if let Some(language) = &args.language {
        options = options.with_language(language.clone());
    }
    if let Some(sort) = args.sort {
        options = options.with_sort(sort);
    }
    if args.include_adult {
        options.include_adult = Some(true);
    }
    options
}

pub async fn run_discover(ctx: &AppContext, args: DiscoverArgs, output: &Output) -> Result<()> {
    let source = ctx.source()?;

    let genre_id = match args.genre.as_deref() {
        Some(genre) if genre.trim().parse::<u32>().is_err() => {
            let genres = source.genres().await?;
            let id = resolve_genre(genre, &genres);
            if id.is_none() {
                output.warn(format!("Unknown genre '{}', showing all genres", genre));
            }
            id
        }
        Some(genre) => resolve_genre(genre, &[]),
        None => None,
    };
    let options = build_options(&args, genre_id);

    let scope = ViewScope::new(Arc::new(DiscoverOrchestrator::new(source)));
    let discover = scope.view();

    let mut outcome = {
        let _spinner = output.spinner("Discovering movies...");
        discover.discover(options, true).await
    };
    let mut attempts = 0;
    while outcome == FetchOutcome::Failed && attempts < args.retries {
        attempts += 1;
        debug!("Retrying discover (attempt {})", attempts);
        outcome = discover.retry().await;
    }
    if outcome == FetchOutcome::Failed {
        let error = discover.state().await.error;
        scope.close().await;
        return Err(eyre!(error.unwrap_or_else(|| "Discover failed".to_string())));
    }

    for _ in 1..args.pages {
        let more = {
            let _spinner = output.spinner("Loading more movies...");
            discover.load_more().await
        };
        match more {
            FetchOutcome::Applied => {}
            FetchOutcome::Failed => {
                if let Some(error) = discover.state().await.error {
                    output.warn(error);
                }
                break;
            }
            _ => break,
        }
    }

    let state = discover.state().await;
    print_state(&state, output);
    scope.close().await;
    Ok(())
}

fn print_state(state: &DiscoverState, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "filters": state.options,
            "current_page": state.cursor.current_page,
            "total_pages": state.cursor.total_pages,
            "has_more": state.has_more(),
            "results": state.results(),
        }));
        return;
    }

    output.heading(&format!(
        "Discover (page {} of {})",
        state.cursor.current_page, state.cursor.total_pages
    ));
    output.movies("results", state.results());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres() -> Vec<Genre> {
        vec![
            Genre { id: 28, name: "Action".to_string() },
            Genre { id: 878, name: "Science Fiction".to_string() },
        ]
    }

    #[test]
    fn test_resolve_genre_by_id_or_name() {
        assert_eq!(resolve_genre("878", &[]), Some(878));
        assert_eq!(resolve_genre("science fiction", &genres()), Some(878));
        assert_eq!(resolve_genre("Western", &genres()), None);
    }

    #[test]
    fn test_build_options_maps_filters() {
        let args = DiscoverArgs {
            min_rating: Some(7.5),
            year: Some(1999),
            language: Some("ja".to_string()),
            sort: Some(SortBy::VoteAverageDesc),
            pages: 1,
            ..Default::default()
        };
        let options = build_options(&args, Some(28));

        assert_eq!(options.with_genres.as_deref(), Some("28"));
        assert_eq!(options.vote_average_gte, Some(7.5));
        assert_eq!(options.vote_average_lte, None);
        assert_eq!(options.release_date_gte.as_deref(), Some("1999-01-01"));
        assert_eq!(options.with_original_language.as_deref(), Some("ja"));
        assert_eq!(options.sort_by, Some(SortBy::VoteAverageDesc));
        assert_eq!(options.include_adult, None);
    }

    #[test]
    fn test_no_filters_is_unfiltered() {
        assert!(build_options(&DiscoverArgs::default(), None).is_unfiltered());
    }
}
