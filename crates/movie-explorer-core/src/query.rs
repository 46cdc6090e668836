//! Advanced search syntax.
//!
//! A query starting with one of the filter prefixes (`genre:`, `year:`,
//! `rating:`, `before:`, `after:`, `with:`, `director:`, `cast:`) is turned
//! into discovery filters instead of being sent to text search:
//!
//! ```text
//! genre:Action year:1999     -> with_genres=28 (when "Action" is a known genre)
//! year:1999                  -> primary_release_date 1999-01-01..1999-12-31
//! after:2010 before:2015     -> primary_release_date 2010-01-01..2015-12-31
//! rating:8                   -> vote_average.gte=8 (capped at 10)
//! ```

use movie_explorer_models::{DiscoverOptions, Genre};
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_RATING: f64 = 10.0;

struct QueryPatterns {
    advanced_prefix: Regex,
    genre: Regex,
    year: Regex,
    after: Regex,
    before: Regex,
    rating: Regex,
    reserved: Regex,
}

impl QueryPatterns {
    fn new() -> Self {
        Self {
            advanced_prefix: Regex::new(r"^(year:|genre:|rating:|before:|after:|with:|director:|cast:)")
                .expect("Invalid advanced_prefix regex"),
            genre: Regex::new(r"genre:([a-zA-Z\s]+)").expect("Invalid genre regex"),
            year: Regex::new(r"year:([0-9]{4})").expect("Invalid year regex"),
            after: Regex::new(r"after:([0-9]{4})").expect("Invalid after regex"),
            before: Regex::new(r"before:([0-9]{4})").expect("Invalid before regex"),
            rating: Regex::new(r"rating:([0-9]+)").expect("Invalid rating regex"),
            reserved: Regex::new(r"(?:^|\s)(with|director|cast):").expect("Invalid reserved regex"),
        }
    }
}

static PATTERNS: LazyLock<QueryPatterns> = LazyLock::new(QueryPatterns::new);

/// Filters extracted from an advanced query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    pub options: DiscoverOptions,
    /// Recognized prefixes that have no filter behind them yet
    pub reserved: Vec<String>,
}

/// Where a submitted query is sent
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    Text { query: String, page: u32 },
    Discover(ParsedQuery),
}

pub fn is_advanced(query: &str) -> bool {
    PATTERNS.advanced_prefix.is_match(query)
}

fn captured_year(re: &Regex, query: &str) -> Option<u32> {
    re.captures(query).and_then(|c| c[1].parse().ok())
}

/// Extract discovery filters from `query`. Unknown genres and absent
/// patterns contribute nothing.
pub fn parse_advanced(query: &str, genres: &[Genre], page: u32) -> ParsedQuery {
    let mut options = DiscoverOptions::new().with_page(page.max(1));

    if let Some(caps) = PATTERNS.genre.captures(query) {
        let wanted = caps[1].trim().to_lowercase();
        if let Some(genre) = genres.iter().find(|g| g.name.to_lowercase() == wanted) {
            options.with_genres = Some(genre.id.to_string());
        }
    }

    if let Some(year) = captured_year(&PATTERNS.year, query) {
        options = options.with_release_year(year);
    }
    // after/before narrow one bound each and win over year
    if let Some(year) = captured_year(&PATTERNS.after, query) {
        options.release_date_gte = Some(format!("{year}-01-01"));
    }
    if let Some(year) = captured_year(&PATTERNS.before, query) {
        options.release_date_lte = Some(format!("{year}-12-31"));
    }

    if let Some(rating) = PATTERNS.rating.captures(query).and_then(|c| c[1].parse::<f64>().ok()) {
        options.vote_average_gte = Some(rating.min(MAX_RATING));
    }

    let reserved = PATTERNS
        .reserved
        .captures_iter(query)
        .map(|c| c[1].to_string())
        .collect();

    ParsedQuery { options, reserved }
}

/// Decide how to run `query` for `page`
pub fn plan(query: &str, genres: &[Genre], page: u32) -> SearchRequest {
    if is_advanced(query) {
        SearchRequest::Discover(parse_advanced(query, genres, page))
    } else {
        SearchRequest::Text {
            query: query.to_string(),
            page: page.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres() -> Vec<Genre> {
        vec![
            Genre { id: 28, name: "Action".into() },
            Genre { id: 878, name: "Science Fiction".into() },
        ]
    }

    #[test]
    fn test_is_advanced() {
        assert!(is_advanced("year:1999"));
        assert!(is_advanced("cast:Keanu"));
        assert!(!is_advanced("the year:1999"));
        assert!(!is_advanced("batman"));
    }

    #[test]
    fn test_year_sets_both_bounds() {
        let parsed = parse_advanced("year:1999", &genres(), 1);
        assert_eq!(parsed.options.release_date_gte.as_deref(), Some("1999-01-01"));
        assert_eq!(parsed.options.release_date_lte.as_deref(), Some("1999-12-31"));
        assert_eq!(parsed.options.page, Some(1));
    }

    #[test]
    fn test_genre_matches_case_insensitively() {
        let parsed = parse_advanced("genre:action", &genres(), 1);
        assert_eq!(parsed.options.with_genres.as_deref(), Some("28"));

        let parsed = parse_advanced("genre: Science Fiction ", &genres(), 1);
        assert_eq!(parsed.options.with_genres.as_deref(), Some("878"));
    }

    #[test]
    fn test_unknown_genre_is_ignored() {
        let parsed = parse_advanced("genre:Nonexistent", &genres(), 1);
        assert_eq!(parsed.options.with_genres, None);
        assert!(parsed.options.is_unfiltered());
    }

    #[test]
    fn test_after_and_before_override_year() {
        let parsed = parse_advanced("year:2000 after:2005 before:2010", &genres(), 2);
        assert_eq!(parsed.options.release_date_gte.as_deref(), Some("2005-01-01"));
        assert_eq!(parsed.options.release_date_lte.as_deref(), Some("2010-12-31"));
        assert_eq!(parsed.options.page, Some(2));
    }

    #[test]
    fn test_rating_is_capped() {
        assert_eq!(parse_advanced("rating:7", &genres(), 1).options.vote_average_gte, Some(7.0));
        assert_eq!(parse_advanced("rating:42", &genres(), 1).options.vote_average_gte, Some(10.0));
    }

    #[test]
    fn test_non_ascii_digits_add_no_filters() {
        let parsed = parse_advanced("rating:\u{0665}", &[], 1);
        assert_eq!(parsed.options.vote_average_gte, None);

        let parsed = parse_advanced("year:\u{0661}\u{0669}\u{0669}\u{0669} after:\u{0662}\u{0660}\u{0661}\u{0660}", &[], 1);
        assert_eq!(parsed.options.release_date_gte, None);
        assert_eq!(parsed.options.release_date_lte, None);
    }

    #[test]
    fn test_reserved_prefixes_are_reported() {
        let parsed = parse_advanced("director:Nolan cast:Caine", &genres(), 1);
        assert_eq!(parsed.reserved, vec!["director".to_string(), "cast".to_string()]);
        assert!(parsed.options.is_unfiltered());
    }

    #[test]
    fn test_plan_routes_plain_text_unmodified() {
        assert_eq!(
            plan("  Batman ", &genres(), 0),
            SearchRequest::Text {
                query: "  Batman ".into(),
                page: 1
            }
        );
        assert!(matches!(plan("rating:8", &genres(), 1), SearchRequest::Discover(_)));
    }
}
