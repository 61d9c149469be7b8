use crate::error::BotError;
use crate::types::{ResultItem, SearchQuery};
use crate::AppState;
use std::sync::Arc;
use tracing::{debug, info};

/// Outbound search must fail fast; the handler degrades a timeout to an
/// empty result set.
pub const SEARCH_TIMEOUT_SECS: u64 = 20;

const SEARCH_ENDPOINT: &str = "/open/search/disk";
const USER_AGENT: &str = "netdisk-bot/0.1";

/// Candidate key paths for the result list, in priority order. The upstream
/// response shape varies between deployments.
const RESULT_PATHS: &[&[&str]] = &[
    &["data", "list"],
    &["data", "items"],
    &["results"],
    &["items"],
    &["list"],
    &["data"],
];

/// Calls the aggregator search API and normalizes the response.
pub async fn search_resources(
    state: &Arc<AppState>,
    query: &SearchQuery,
) -> Result<Vec<ResultItem>, BotError> {
    info!("Searching for: {}", query.text);

    let payload = serde_json::json!({
        "q": query.text,
        "page": 1,
        "size": state.config.page_size,
        "time": query.time_filter,
        "type": query.file_type,
        "exact": query.exact_match,
    });

    let url = format!("{}{}", state.config.api_base_url, SEARCH_ENDPOINT);
    debug!("Search URL: {}", url);

    let response = state
        .http_client
        .post(&url)
        .json(&payload)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(BotError::Status(status.as_u16()));
    }

    let data: serde_json::Value = response
        .json()
        .await
        .map_err(|e| BotError::Parse(e.to_string()))?;

    let results = extract_results(&data);
    debug!("Normalized {} results", results.len());
    Ok(results)
}

/// Locates the result list in an arbitrarily-shaped response body.
///
/// Tries each candidate path in order; the first path that fully resolves
/// to a JSON array wins. Anything else, including a non-object body, yields
/// an empty list. No partial-path fallback merging.
pub fn extract_results(data: &serde_json::Value) -> Vec<ResultItem> {
    if !data.is_object() {
        return Vec::new();
    }

    for path in RESULT_PATHS {
        let mut current = data;
        let mut resolved = true;
        for key in *path {
            match current.get(key) {
                Some(value) => current = value,
                None => {
                    resolved = false;
                    break;
                }
            }
        }
        if resolved {
            if let Some(items) = current.as_array() {
                return items.iter().cloned().map(ResultItem).collect();
            }
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_nested_data_list() {
        let data = json!({"data": {"list": [1, 2, 3]}});
        let results = extract_results(&data);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, json!(1));
    }

    #[test]
    fn unknown_shape_yields_empty() {
        assert!(extract_results(&json!({"foo": "bar"})).is_empty());
    }

    #[test]
    fn non_object_yields_empty() {
        assert!(extract_results(&json!([1, 2, 3])).is_empty());
        assert!(extract_results(&json!("text")).is_empty());
        assert!(extract_results(&json!(null)).is_empty());
    }

    #[test]
    fn path_priority_prefers_data_list() {
        let data = json!({
            "data": {"list": [{"name": "a"}]},
            "results": [{"name": "b"}, {"name": "c"}]
        });
        let results = extract_results(&data);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title(), "a");
    }

    #[test]
    fn skips_paths_that_resolve_to_non_arrays() {
        // `data` resolves but is an object, `results` is the first array.
        let data = json!({
            "data": {"total": 2},
            "results": [{"name": "a"}, {"name": "b"}]
        });
        assert_eq!(extract_results(&data).len(), 2);
    }

    #[test]
    fn bare_data_array_resolves_last() {
        let data = json!({"data": [{"name": "a"}]});
        assert_eq!(extract_results(&data).len(), 1);
    }
}
