use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String, // "YouTube", "Vimeo"
    #[serde(default)]
    pub size: u32,
    #[serde(rename = "type")]
    pub video_type: String, // "Trailer", "Teaser", "Featurette"
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub published_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoList {
    pub id: u64,
    #[serde(default)]
    pub results: Vec<Video>,
}

impl VideoList {
    pub fn trailer(&self) -> Option<&Video> {
        pick_trailer(&self.results)
    }
}

/// Trailer to feature for a movie: an official YouTube trailer when one
/// exists, otherwise any YouTube trailer.
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    let youtube_trailers = || {
        videos
            .iter()
            .filter(|v| v.site == "YouTube" && v.video_type == "Trailer")
    };
    youtube_trailers()
        .find(|v| v.official)
        .or_else(|| youtube_trailers().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(key: &str, site: &str, video_type: &str, official: bool) -> Video {
        Video {
            id: key.to_string(),
            key: key.to_string(),
            name: key.to_string(),
            site: site.to_string(),
            size: 1080,
            video_type: video_type.to_string(),
            official,
            published_at: String::new(),
        }
    }

    #[test]
    fn test_trailer_prefers_official() {
        let list = VideoList {
            id: 1,
            results: vec![
                video("teaser", "YouTube", "Teaser", true),
                video("fan", "YouTube", "Trailer", false),
                video("official", "YouTube", "Trailer", true),
            ],
        };
        assert_eq!(list.trailer().map(|v| v.key.as_str()), Some("official"));
    }

    #[test]
    fn test_trailer_ignores_other_sites() {
        let list = VideoList {
            id: 1,
            results: vec![video("vimeo", "Vimeo", "Trailer", true)],
        };
        assert!(list.trailer().is_none());
    }
}
