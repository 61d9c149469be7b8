use serde::{Deserialize, Serialize};

/// Normalized search parameters extracted from one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// File-type code ("video", "software", ...) or empty for no filter.
    pub file_type: String,
    /// Time-filter code ("today", "week", ...) or empty for no filter.
    pub time_filter: String,
    pub exact_match: bool,
}

impl SearchQuery {
    /// Composite cache key covering the query text and every filter.
    pub fn cache_key(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.text, self.file_type, self.time_filter, self.exact_match
        )
    }
}

/// One search result as returned by the aggregator API.
///
/// The upstream schema is not contractually stable, so this wraps the raw
/// JSON object and every accessor falls through an ordered list of candidate
/// keys, tolerating absent fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem(pub serde_json::Value);

impl ResultItem {
    /// First candidate key holding a string value, in order.
    pub fn field_str(&self, candidates: &[&str]) -> Option<&str> {
        candidates
            .iter()
            .find_map(|key| self.0.get(key).and_then(|v| v.as_str()))
    }

    pub fn title(&self) -> &str {
        self.field_str(&["name", "title", "filename"])
            .unwrap_or("未知标题")
    }

    /// Size in bytes, if the upstream value is numeric.
    pub fn size(&self) -> Option<f64> {
        ["size", "fileSize"]
            .iter()
            .find_map(|key| self.0.get(key).and_then(|v| v.as_f64()))
    }

    pub fn source(&self) -> Option<&str> {
        self.field_str(&["source", "platform", "disk"])
            .filter(|s| !s.is_empty())
    }

    pub fn file_type(&self) -> &str {
        self.field_str(&["type", "fileType"]).unwrap_or("")
    }

    pub fn update_time(&self) -> Option<&str> {
        self.field_str(&["updateTime", "time"])
            .filter(|s| !s.is_empty())
    }
}

/// Row from `search_history`.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub query: String,
    pub file_type: String,
    pub results_count: i64,
    pub search_time: String,
}

/// Row from `user_favorites`.
#[derive(Debug, Clone)]
pub struct FavoriteEntry {
    pub resource_title: String,
    pub resource_info: String,
    pub add_time: String,
}

/// Row from `popular_searches`.
#[derive(Debug, Clone)]
pub struct PopularEntry {
    pub query: String,
    pub search_count: i64,
    pub last_search: String,
}
