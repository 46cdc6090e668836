use super::context::AppContext;
use crate::output::Output;
use crate::{CollectionCommands, FavoriteCommands};
use color_eyre::Result;
use movie_explorer_core::{CollectionKind, CollectionsStore, MovieDetailsLoader};
use movie_explorer_models::{Genre, Movie};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::warn;

pub async fn run_watchlist(ctx: &AppContext, cmd: CollectionCommands, output: &Output) -> Result<()> {
    run_collection(ctx, CollectionKind::Watchlist, cmd, output).await
}

pub async fn run_favorites(ctx: &AppContext, cmd: FavoriteCommands, output: &Output) -> Result<()> {
    match cmd {
        FavoriteCommands::Common(cmd) => run_collection(ctx, CollectionKind::Favorites, cmd, output).await,
        FavoriteCommands::Toggle { id } => {
            let movie = fetch_summary(ctx, id, output).await?;
            let title = movie.title.clone();
            if ctx.collections().toggle_favorite(movie)? {
                output.success(format!("Added '{}' to favorites", title));
            } else {
                output.success(format!("Removed '{}' from favorites", title));
            }
            Ok(())
        }
        FavoriteCommands::Stats => show_stats(ctx, output).await,
    }
}

async fn run_collection(ctx: &AppContext, kind: CollectionKind, cmd: CollectionCommands, output: &Output) -> Result<()> {
    let store = ctx.collections();
    match cmd {
        CollectionCommands::List => {
            let movies = store.list(kind);
            output.heading(&format!("{} ({})", title(kind), movies.len()));
            output.movies(kind.as_str(), &movies);
        }
        CollectionCommands::Add { id } => {
            if store.contains(kind, id) {
                output.info(format!("Movie {} is already in your {}", id, kind));
                return Ok(());
            }
            let movie = fetch_summary(ctx, id, output).await?;
            let title = movie.title.clone();
            store.add(kind, movie)?;
            output.success(format!("Added '{}' to your {}", title, kind));
        }
        CollectionCommands::Remove { id } => {
            if store.remove(kind, id)? {
                output.success(format!("Removed movie {} from your {}", id, kind));
            } else {
                output.warn(format!("Movie {} is not in your {}", id, kind));
            }
        }
        CollectionCommands::Move { id } => move_movie(&store, id, kind, output)?,
        CollectionCommands::Clear => {
            store.clear(kind)?;
            output.success(format!("Cleared your {}", kind));
        }
    }
    Ok(())
}

fn move_movie(store: &CollectionsStore, id: u64, from: CollectionKind, output: &Output) -> Result<()> {
    let to = from.other();
    if store.move_between(id, from, to)? {
        output.success(format!("Moved movie {} from your {} to your {}", id, from, to));
    } else {
        output.warn(format!("Movie {} is not in your {}", id, from));
    }
    Ok(())
}

fn title(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Watchlist => "Watchlist",
        CollectionKind::Favorites => "Favorites",
    }
}

async fn fetch_summary(ctx: &AppContext, id: u64, output: &Output) -> Result<Movie> {
    let loader = MovieDetailsLoader::new(ctx.source()?);
    let details = {
        let _spinner = output.spinner("Loading movie...");
        loader.load(id).await
    }?;
    Ok(details.summary())
}

/// Favorite counts per genre, labelled with genre names where known
fn label_counts(counts: &BTreeMap<String, usize>, genres: &[Genre]) -> Vec<(String, usize)> {
    let mut labelled: Vec<(String, usize)> = counts
        .iter()
        .map(|(key, count)| {
            let name = key
                .strip_prefix("genre-")
                .and_then(|id| id.parse::<u32>().ok())
                .and_then(|id| genres.iter().find(|g| g.id == id))
                .map(|g| g.name.clone())
                .unwrap_or_else(|| key.clone());
            (name, *count)
        })
        .collect();
    labelled.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    labelled
}

async fn show_stats(ctx: &AppContext, output: &Output) -> Result<()> {
    let store = ctx.collections();
    let counts = store.favorite_category_counts();

    let genres = match ctx.source() {
        Ok(source) => source.genres().await.unwrap_or_else(|e| {
            warn!("Genre names unavailable: {}", e);
            Vec::new()
        }),
        Err(e) => {
            warn!("Genre names unavailable: {}", e);
            Vec::new()
        }
    };
    let labelled = label_counts(&counts, &genres);

    if !output.is_human() {
        let by_genre: serde_json::Map<String, serde_json::Value> =
            labelled.iter().map(|(name, count)| (name.clone(), json!(count))).collect();
        output.json(&json!({
            "favorites": store.len(CollectionKind::Favorites),
            "watchlist": store.len(CollectionKind::Watchlist),
            "genres": by_genre,
        }));
        return Ok(());
    }

    let rows: Vec<(&str, String)> = labelled
        .iter()
        .map(|(name, count)| (name.as_str(), count.to_string()))
        .collect();
    output.key_values(
        &format!("Favorites by genre ({} movies)", store.len(CollectionKind::Favorites)),
        &rows,
    );
    Ok(())
}
