use super::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use movie_explorer_core::{CollectionsStore, MovieDetailsLoader, MovieView};
use movie_explorer_models::format::{
    format_currency, format_names_list, format_rating, format_release_date, format_runtime, image_url, ImageKind,
    ImageSize,
};
use movie_explorer_models::{MovieDetails, Video};
use serde_json::json;

const LIST_PREVIEW: usize = 5;

fn trailer_url(video: &Video) -> String {
    format!("https://www.youtube.com/watch?v={}", video.key)
}

fn yes_no(value: bool) -> String {
    let answer = if value { "yes" } else { "no" };
    answer.to_string()
}

fn summary_rows(details: &MovieDetails, image_base_url: &str, collections: &CollectionsStore) -> Vec<(&'static str, String)> {
    let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    let mut rows = vec![
        ("Title", details.title.clone()),
        ("Released", format_release_date(&details.release_date)),
        ("Runtime", format_runtime(details.runtime)),
        ("Rating", format!("{} ({} votes)", format_rating(details.vote_average), details.vote_count)),
        ("Genres", format_names_list(&genres, 4)),
        ("Status", details.status.clone()),
    ];
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        rows.insert(1, ("Tagline", tagline.to_string()));
    }
    if details.budget > 0 {
        rows.push(("Budget", format_currency(details.budget)));
    }
    if details.revenue > 0 {
        rows.push(("Revenue", format_currency(details.revenue)));
    }
    rows.push((
        "Poster",
        image_url(image_base_url, details.poster_path.as_deref(), ImageKind::Poster, ImageSize::Large),
    ));
    rows.push(("In watchlist", yes_no(collections.is_in_watchlist(details.id))));
    rows.push(("Favorite", yes_no(collections.is_favorite(details.id))));
    rows
}

pub async fn run_details(ctx: &AppContext, movie_id: u64, full: bool, output: &Output) -> Result<()> {
    let loader = MovieDetailsLoader::new(ctx.source()?);
    let collections = ctx.collections();
    let image_base_url = ctx.config.api.image_base_url.as_str();

    if !full {
        let details = {
            let _spinner = output.spinner("Loading movie details...");
            loader.load(movie_id).await
        }?;
        if !output.is_human() {
            output.json(&json!({ "details": details }));
            return Ok(());
        }
        output.heading(&details.title);
        output.key_values("Movie", &summary_rows(&details, image_base_url, &collections));
        output.println(&details.overview);
        return Ok(());
    }

    let view = {
        let _spinner = output.spinner("Loading movie details...");
        loader.load_full(movie_id).await
    }?;
    print_view(&view, image_base_url, &collections, output);
    Ok(())
}

fn print_view(view: &MovieView, image_base_url: &str, collections: &CollectionsStore, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "details": view.details,
            "directors": view.directors(),
            "cast": view.credits.top_cast(10),
            "trailer": view.trailer().map(trailer_url),
            "similar": view.similar,
            "recommendations": view.recommendations,
            "collection": view.collection,
        }));
        return;
    }

    let mut rows = summary_rows(&view.details, image_base_url, collections);
    rows.push(("Directed by", format_names_list(&view.directors(), 3)));
    let cast: Vec<String> = view
        .credits
        .top_cast(LIST_PREVIEW)
        .into_iter()
        .map(|c| format!("{} as {}", c.name, c.character))
        .collect();
    let cast: Vec<&str> = cast.iter().map(String::as_str).collect();
    rows.push(("Cast", format_names_list(&cast, LIST_PREVIEW)));
    if let Some(trailer) = view.trailer() {
        rows.push(("Trailer", trailer_url(trailer)));
    }

    output.heading(&view.details.title);
    output.key_values("Movie", &rows);
    output.println(&view.details.overview);

    if let Some(collection) = &view.collection {
        output.heading(&format!("Part of {}", collection.name));
        output.movies("collection", &collection.parts);
    }
    output.heading("Similar Movies");
    output.movies("similar", &view.similar[..view.similar.len().min(LIST_PREVIEW)]);
    output.heading("Recommended");
    output.movies(
        "recommendations",
        &view.recommendations[..view.recommendations.len().min(LIST_PREVIEW)],
    );
}
