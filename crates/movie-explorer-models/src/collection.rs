use serde::{Deserialize, Serialize};
use crate::movie::Movie;

/// Franchise grouping returned by the metadata API's collection endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionDetails {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub parts: Vec<Movie>,
}
