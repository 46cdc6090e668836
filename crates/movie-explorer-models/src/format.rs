//! Display helpers shared by every front end.

use chrono::NaiveDate;

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    Small,
    Medium,
    #[default]
    Large,
}

/// Full image URL for an API image path, or a placeholder when the movie
/// has no image of that kind.
pub fn image_url(base_url: &str, path: Option<&str>, kind: ImageKind, size: ImageSize) -> String {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return match kind {
            ImageKind::Poster => "https://via.placeholder.com/500x750?text=No+Image",
            ImageKind::Profile => "https://via.placeholder.com/300x450?text=No+Profile",
            ImageKind::Backdrop => "https://via.placeholder.com/1280x720?text=No+Backdrop",
        }
        .to_string();
    };

    let width = match (kind, size) {
        (ImageKind::Poster, ImageSize::Small) => "w185",
        (ImageKind::Poster, ImageSize::Medium) => "w342",
        (ImageKind::Poster, ImageSize::Large) => "w500",
        (ImageKind::Profile, ImageSize::Small) => "w45",
        (ImageKind::Profile, ImageSize::Medium) => "w185",
        (ImageKind::Profile, ImageSize::Large) => "h632",
        (ImageKind::Backdrop, ImageSize::Small) => "w300",
        (ImageKind::Backdrop, ImageSize::Medium) => "w780",
        (ImageKind::Backdrop, ImageSize::Large) => "w1280",
    };
    format!("{}/{}{}", base_url.trim_end_matches('/'), width, path)
}

/// Average rating with one decimal place
pub fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

/// "2h 28m", "45m", or "N/A" for unknown runtimes
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        None | Some(0) => "N/A".to_string(),
        Some(m) if m < 60 => format!("{}m", m),
        Some(m) => format!("{}h {}m", m / 60, m % 60),
    }
}

/// Whole US dollars with thousands separators
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

/// "March 31, 1999" from an API date, "N/A" when missing or malformed
pub fn format_release_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| "N/A".to_string())
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head.trim_end())
}

/// "A, B, C +2 more"
pub fn format_names_list(names: &[&str], limit: usize) -> String {
    if names.is_empty() {
        return "N/A".to_string();
    }
    if names.len() <= limit {
        return names.join(", ");
    }
    format!("{} +{} more", names[..limit].join(", "), names.len() - limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_sizes() {
        assert_eq!(
            image_url(IMAGE_BASE_URL, Some("/abc.jpg"), ImageKind::Poster, ImageSize::Medium),
            "https://image.tmdb.org/t/p/w342/abc.jpg"
        );
        assert_eq!(
            image_url(IMAGE_BASE_URL, Some("/abc.jpg"), ImageKind::Backdrop, ImageSize::Large),
            "https://image.tmdb.org/t/p/w1280/abc.jpg"
        );
        assert!(image_url(IMAGE_BASE_URL, None, ImageKind::Profile, ImageSize::Small).contains("No+Profile"));
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(Some(148)), "2h 28m");
        assert_eq!(format_runtime(Some(45)), "45m");
        assert_eq!(format_runtime(None), "N/A");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(950), "$950");
        assert_eq!(format_currency(160_000_000), "$160,000,000");
    }

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date("1999-03-31"), "March 31, 1999");
        assert_eq!(format_release_date(""), "N/A");
    }

    #[test]
    fn test_truncate_and_names() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a long overview text", 6), "a long...");
        assert_eq!(format_names_list(&["A", "B", "C", "D"], 2), "A, B +2 more");
        assert_eq!(format_names_list(&[], 3), "N/A");
        assert_eq!(format_rating(7.26), "7.3");
    }
}
