use serde::{Deserialize, Serialize};

/// One remembered search, most recent first in the history log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryItem {
    pub query: String,
    pub timestamp: i64, // epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u32>,
}
