use crate::types::SearchQuery;
use crate::{extract, format, search, AppState};
use std::sync::Arc;
use tracing::{error, info};

/// Entry point for one inbound chat message. `None` means intentional
/// silence: the message carried no search trigger and no known command.
pub async fn handle(state: &Arc<AppState>, message: &str, user_id: &str) -> Option<String> {
    let message = message.trim();

    if message.starts_with("我的收藏") || message.starts_with("收藏列表") {
        return Some(show_favorites(state, user_id).await);
    }
    if message.starts_with("搜索历史") || message.starts_with("历史记录") {
        return Some(show_history(state, user_id).await);
    }
    if message.starts_with("热门搜索") || message.starts_with("热门资源") {
        return Some(show_popular(state).await);
    }
    if let Some(rest) = message.strip_prefix("收藏") {
        return Some(add_favorite(state, user_id, rest).await);
    }

    if !extract::has_trigger(message) {
        return None;
    }

    let query = extract::extract_query(message);
    if query.text.is_empty() {
        return Some(format::help_text(&state.config.api_base_url));
    }

    Some(run_search(state, user_id, &query).await)
}

async fn run_search(state: &Arc<AppState>, user_id: &str, query: &SearchQuery) -> String {
    let cache_key = query.cache_key();

    let (results, cache_hit) = match state.search_cache.get(&cache_key).await {
        Some(cached) => {
            info!("search cache hit for {}", query.text);
            (cached, true)
        }
        None => {
            let results = match search::search_resources(state, query).await {
                Ok(results) => {
                    state.search_cache.insert(cache_key, results.clone()).await;
                    if let Err(e) = state.store.bump_popular(&query.text).await {
                        error!("更新热门搜索失败: {e}");
                    }
                    results
                }
                Err(e) => {
                    // Network, status, and parse failures all degrade to an
                    // empty result set.
                    error!("搜索请求失败: {e}");
                    Vec::new()
                }
            };
            (results, false)
        }
    };

    if let Err(e) = state
        .store
        .record_search(user_id, &query.text, &query.file_type, results.len())
        .await
    {
        error!("记录搜索历史失败: {e}");
    }

    // Remember what this user was shown so 收藏[序号] can resolve against it.
    let shown: Vec<_> = results.iter().take(format::DISPLAY_LIMIT).cloned().collect();
    state.last_results.insert(user_id.to_string(), shown).await;

    if results.is_empty() {
        format::no_results_message(&query.text)
    } else {
        format::format_results(&results, &query.text, cache_hit, &state.config.api_base_url)
    }
}

async fn add_favorite(state: &Arc<AppState>, user_id: &str, rest: &str) -> String {
    let serial: usize = match rest.trim().parse() {
        Ok(n) if n >= 1 => n,
        _ => return "用法：收藏[序号]，例如 收藏2（先搜索，再按结果序号收藏）".to_string(),
    };

    let Some(results) = state.last_results.get(user_id).await else {
        return "还没有可收藏的搜索结果，请先搜索资源 😊".to_string();
    };
    let Some(item) = results.get(serial - 1) else {
        return format!("没有序号为 {serial} 的搜索结果");
    };

    let mut info = format::format_file_size(item.size());
    if let Some(source) = item.source() {
        info.push_str(&format!(" | 🌐 {source}"));
    }

    match state.store.add_favorite(user_id, item.title(), &info).await {
        Ok(()) => format!("⭐ 已收藏「{}」", item.title()),
        Err(e) => {
            error!("收藏资源失败: {e}");
            "收藏失败，请稍后再试 😔".to_string()
        }
    }
}

async fn show_history(state: &Arc<AppState>, user_id: &str) -> String {
    match state.store.history_for(user_id).await {
        Ok(entries) => format::format_history(&entries),
        Err(e) => {
            error!("获取搜索历史错误: {e}");
            "获取搜索历史失败 😔".to_string()
        }
    }
}

async fn show_favorites(state: &Arc<AppState>, user_id: &str) -> String {
    match state.store.favorites_for(user_id).await {
        Ok(entries) => format::format_favorites(&entries),
        Err(e) => {
            error!("获取收藏列表错误: {e}");
            "获取收藏列表失败 😔".to_string()
        }
    }
}

async fn show_popular(state: &Arc<AppState>) -> String {
    match state.store.popular().await {
        Ok(entries) => format::format_popular(&entries),
        Err(e) => {
            error!("获取热门搜索错误: {e}");
            "获取热门搜索失败 😔".to_string()
        }
    }
}
