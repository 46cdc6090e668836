use super::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_explorer_core::query;
use movie_explorer_core::{FetchOutcome, SearchOrchestrator, SearchState, ViewScope};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SearchArgs {
    pub query: String,
    pub pages: u32,
    pub retries: u32,
    pub record_history: bool,
}

pub async fn run_search(ctx: &AppContext, args: SearchArgs, output: &Output) -> Result<()> {
    let source = ctx.source()?;
    let orchestrator = Arc::new(SearchOrchestrator::new(source.clone()));

    // Genre names are only needed to resolve `genre:` filters
    if query::is_advanced(args.query.trim()) {
        match source.genres().await {
            Ok(genres) => orchestrator.set_genres(genres).await,
            Err(e) => warn!("Genre list unavailable, genre filters will not match: {}", e),
        }
    }

    let scope = ViewScope::new(orchestrator);
    let search = scope.view();

    let mut outcome = {
        let _spinner = output.spinner(format!("Searching for '{}'...", args.query.trim()));
        search.search(&args.query, 1).await
    };
    let mut attempts = 0;
    while outcome == FetchOutcome::Failed && attempts < args.retries {
        attempts += 1;
        debug!("Retrying search (attempt {})", attempts);
        outcome = search.retry().await;
    }

    let state = search.state().await;
    match outcome {
        FetchOutcome::Failed => {
            scope.close().await;
            return Err(eyre!(state.error.unwrap_or_else(|| "Search failed".to_string())));
        }
        FetchOutcome::Ignored => {
            scope.close().await;
            output.warn("Enter a search term");
            return Ok(());
        }
        FetchOutcome::Applied if args.record_history => {
            let poster = state.results().first().and_then(|m| m.poster_path.clone());
            ctx.history()
                .record(&args.query, poster, Some(state.results().len() as u32))?;
        }
        _ => {}
    }

    for _ in 1..args.pages {
        if !search.state().await.has_more() {
            break;
        }
        let more = {
            let _spinner = output.spinner("Loading more results...");
            search.load_more().await
        };
        if more == FetchOutcome::Failed {
            if let Some(error) = search.state().await.error {
                output.warn(error);
            }
            break;
        }
    }

    let state = search.state().await;
    print_state(&state, output);
    scope.close().await;
    Ok(())
}

fn print_state(state: &SearchState, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "query": state.query,
            "current_page": state.current_page(),
            "total_pages": state.total_pages(),
            "has_more": state.has_more(),
            "results": state.results(),
        }));
        return;
    }

    output.heading(&format!(
        "Results for '{}' (page {} of {})",
        state.query,
        state.current_page(),
        state.total_pages()
    ));
    output.movies("results", state.results());
    if state.has_more() {
        output.info(format!("More results available, use --pages {}", state.current_page() + 1));
    }
}
