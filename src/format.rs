use crate::types::{FavoriteEntry, HistoryEntry, PopularEntry, ResultItem};

/// How many results a single reply displays; favorite serials refer to
/// these positions.
pub const DISPLAY_LIMIT: usize = 6;

const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Renders a result list into the reply string, numbered so that the user
/// can reference items with 获取/收藏 serials.
pub fn format_results(results: &[ResultItem], query: &str, cache_hit: bool, site_url: &str) -> String {
    if results.is_empty() {
        return format!("没有找到关于「{query}」的资源 😔");
    }

    let cache_indicator = if cache_hit { " (缓存)" } else { "" };
    let mut response = format!(
        "🔍 找到 {} 个关于「{query}」的资源{cache_indicator}：\n\n",
        results.len()
    );

    for (i, item) in results.iter().take(DISPLAY_LIMIT).enumerate() {
        let n = i + 1;
        let title = item.title();
        let emoji = file_emoji(item.file_type(), title);

        response.push_str(&format!("{emoji} {n}. {title}\n"));
        response.push_str(&format!("   📦 {}", format_file_size(item.size())));
        if let Some(source) = item.source() {
            response.push_str(&format!(" | 🌐 {source}"));
        }
        if let Some(time) = item.update_time() {
            response.push_str(&format!(" | 🕒 {time}"));
        }
        response.push('\n');
        response.push_str(&format!("   💾 获取{n} | ⭐ 收藏{n}\n\n"));
    }

    response.push_str(SEPARATOR);
    response.push('\n');
    response.push_str("🎛️ 快捷操作:\n");
    response.push_str("• 获取[序号] - 获取下载信息\n");
    response.push_str("• 收藏[序号] - 收藏到个人列表\n");
    response.push_str("• 我的收藏 - 查看收藏列表\n");
    response.push_str("• 搜索历史 - 查看搜索记录\n");
    response.push_str("• 热门搜索 - 查看热门资源\n");
    response.push_str(&format!("• 🌐 完整网站: {site_url}"));

    response
}

pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "📝 您还没有搜索历史记录".to_string();
    }

    let mut response = "📝 您的搜索历史 (最近10条)：\n\n".to_string();
    for (i, entry) in entries.iter().enumerate() {
        let type_str = if entry.file_type.is_empty() {
            String::new()
        } else {
            format!("[{}]", entry.file_type)
        };
        response.push_str(&format!("{}. {} {}\n", i + 1, entry.query, type_str));
        response.push_str(&format!(
            "   📊 找到 {} 个结果 | 🕒 {}\n\n",
            entry.results_count,
            truncate(&entry.search_time, 16)
        ));
    }
    response.push_str("💡 直接回复序号可以重新执行该搜索");
    response
}

pub fn format_favorites(entries: &[FavoriteEntry]) -> String {
    if entries.is_empty() {
        return "⭐ 您还没有收藏任何资源\n\n💡 搜索时回复 \"收藏[序号]\" 可以收藏资源".to_string();
    }

    let mut response = format!("⭐ 您的收藏列表 (共{}个)：\n\n", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        response.push_str(&format!("⭐ {}. {}\n", i + 1, entry.resource_title));
        if !entry.resource_info.is_empty() {
            response.push_str(&format!("   {}\n", entry.resource_info));
        }
        response.push_str(&format!("   🕒 {}\n\n", truncate(&entry.add_time, 16)));
    }
    response
}

pub fn format_popular(entries: &[PopularEntry]) -> String {
    if entries.is_empty() {
        return "📊 暂无热门搜索数据".to_string();
    }

    let mut response = "🔥 热门搜索 (最近7天)：\n\n".to_string();
    for (i, entry) in entries.iter().enumerate() {
        let fire_emoji = if entry.search_count >= 10 {
            "🔥"
        } else if entry.search_count >= 5 {
            "⭐"
        } else {
            "💫"
        };
        response.push_str(&format!("{} {}. {}\n", fire_emoji, i + 1, entry.query));
        response.push_str(&format!(
            "   📊 搜索 {} 次 | 🕒 {}\n\n",
            entry.search_count,
            truncate(&entry.last_search, 10)
        ));
    }
    response.push_str("💡 点击感兴趣的关键词直接搜索");
    response
}

pub fn no_results_message(query: &str) -> String {
    format!(
        "抱歉，没有找到关于「{query}」的资源 😔\n\n💡 建议：\n• 尝试更简单的关键词\n• 检查拼写是否正确\n• 查看热门搜索获取灵感"
    )
}

pub fn help_text(site_url: &str) -> String {
    format!(
        "🤖 网盘资源搜索助手\n\
         \n\
         🔍 基础搜索:\n\
         • 搜索 电影名称\n\
         • 找资源 软件名称\n\
         • 下载 文档名称\n\
         \n\
         🎯 高级搜索:\n\
         • 搜索 电影 复仇者联盟 (按类型)\n\
         • 搜索 本月 Python教程 (按时间)\n\
         • 搜索 \"Python 3.9\" (精确匹配)\n\
         \n\
         📋 个人功能:\n\
         • 我的收藏 - 查看收藏的资源\n\
         • 搜索历史 - 查看搜索记录\n\
         • 热门搜索 - 查看热门资源\n\
         \n\
         📂 支持类型:\n\
         电影、视频、软件、程序、文档、图片、音乐、压缩包\n\
         \n\
         ⏰ 时间筛选:\n\
         今天、本周、本月、本年\n\
         \n\
         💡 实用技巧:\n\
         • 关键词要具体明确\n\
         • 组合多个搜索条件\n\
         • 使用引号精确搜索\n\
         • 善用收藏和历史功能\n\
         \n\
         🌐 完整网站: {site_url}"
    )
}

/// Human-readable size with binary (1024-based) thresholds, one decimal
/// above byte scale, "未知" when absent or non-numeric.
pub fn format_file_size(size: Option<f64>) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    match size {
        Some(size) if size > 0.0 => {
            if size >= GB {
                format!("大小: {:.1} GB", size / GB)
            } else if size >= MB {
                format!("大小: {:.1} MB", size / MB)
            } else if size >= KB {
                format!("大小: {:.1} KB", size / KB)
            } else {
                format!("大小: {} B", size as i64)
            }
        }
        _ => "大小: 未知".to_string(),
    }
}

/// Display icon: file-type code first, then extension heuristics on the
/// title, falling back to a generic icon.
pub fn file_emoji(file_type: &str, title: &str) -> &'static str {
    match file_type.to_lowercase().as_str() {
        "video" => return "🎬",
        "audio" => return "🎵",
        "image" => return "🖼️",
        "archive" => return "📦",
        "software" => return "💻",
        "document" => return "📄",
        _ => {}
    }

    const EXT_GROUPS: &[(&[&str], &str)] = &[
        (&[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv"], "🎬"),
        (&[".mp3", ".flac", ".wav", ".aac", ".m4a"], "🎵"),
        (&[".jpg", ".png", ".gif", ".bmp", ".webp"], "🖼️"),
        (&[".zip", ".rar", ".7z", ".tar", ".gz"], "📦"),
        (&[".exe", ".msi", ".dmg", ".deb", ".apk"], "💻"),
        (&[".pdf", ".doc", ".docx", ".txt", ".ppt"], "📄"),
    ];

    let title_lower = title.to_lowercase();
    for (exts, emoji) in EXT_GROUPS {
        if exts.iter().any(|ext| title_lower.contains(ext)) {
            return emoji;
        }
    }

    "📁"
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn size_formatting_thresholds() {
        assert_eq!(format_file_size(Some(500.0)), "大小: 500 B");
        assert_eq!(format_file_size(Some(2048.0)), "大小: 2.0 KB");
        assert_eq!(format_file_size(Some(5.0 * 1024.0 * 1024.0)), "大小: 5.0 MB");
        assert_eq!(
            format_file_size(Some(1.5 * 1024.0 * 1024.0 * 1024.0)),
            "大小: 1.5 GB"
        );
        assert_eq!(format_file_size(None), "大小: 未知");
        assert_eq!(format_file_size(Some(0.0)), "大小: 未知");
    }

    #[test]
    fn emoji_prefers_type_code_over_extension() {
        assert_eq!(file_emoji("video", "notes.pdf"), "🎬");
        assert_eq!(file_emoji("", "movie.mkv"), "🎬");
        assert_eq!(file_emoji("", "song.flac"), "🎵");
        assert_eq!(file_emoji("", "setup.exe"), "💻");
        assert_eq!(file_emoji("", "mystery"), "📁");
    }

    #[test]
    fn formats_result_list_with_serials() {
        let results = vec![
            ResultItem(json!({
                "name": "复仇者联盟4.mkv",
                "size": 5u64 * 1024 * 1024 * 1024,
                "source": "baidu",
                "type": "video"
            })),
            ResultItem(json!({"title": "无名资源"})),
        ];
        let reply = format_results(&results, "复仇者联盟", false, "https://so.yuneu.com");
        assert!(reply.contains("找到 2 个关于「复仇者联盟」的资源"));
        assert!(reply.contains("🎬 1. 复仇者联盟4.mkv"));
        assert!(reply.contains("📦 大小: 5.0 GB | 🌐 baidu"));
        assert!(reply.contains("💾 获取1 | ⭐ 收藏1"));
        assert!(reply.contains("📁 2. 无名资源"));
        assert!(reply.contains("大小: 未知"));
        assert!(reply.contains("完整网站: https://so.yuneu.com"));
    }

    #[test]
    fn cache_hit_is_marked() {
        let results = vec![ResultItem(json!({"name": "a"}))];
        let reply = format_results(&results, "q", true, "https://so.yuneu.com");
        assert!(reply.contains("(缓存)"));
    }

    #[test]
    fn display_is_capped_but_count_is_total() {
        let results: Vec<ResultItem> = (0..8)
            .map(|i| ResultItem(json!({"name": format!("item{i}")})))
            .collect();
        let reply = format_results(&results, "q", false, "site");
        assert!(reply.contains("找到 8 个"));
        assert!(reply.contains("收藏6"));
        assert!(!reply.contains("收藏7"));
    }

    #[test]
    fn empty_lists_have_placeholder_messages() {
        assert_eq!(format_history(&[]), "📝 您还没有搜索历史记录");
        assert!(format_favorites(&[]).contains("还没有收藏任何资源"));
        assert_eq!(format_popular(&[]), "📊 暂无热门搜索数据");
    }

    #[test]
    fn history_rows_show_type_count_and_time() {
        let entries = vec![HistoryEntry {
            query: "复仇者联盟".to_string(),
            file_type: "video".to_string(),
            results_count: 8,
            search_time: "2026-08-30 12:34:56".to_string(),
        }];
        let reply = format_history(&entries);
        assert!(reply.contains("1. 复仇者联盟 [video]"));
        assert!(reply.contains("📊 找到 8 个结果 | 🕒 2026-08-30 12:34"));
    }

    #[test]
    fn popular_tiers_by_count() {
        let entry = |query: &str, count: i64| PopularEntry {
            query: query.to_string(),
            search_count: count,
            last_search: "2026-08-30 12:34:56".to_string(),
        };
        let reply = format_popular(&[entry("a", 12), entry("b", 6), entry("c", 1)]);
        assert!(reply.contains("🔥 1. a"));
        assert!(reply.contains("⭐ 2. b"));
        assert!(reply.contains("💫 3. c"));
        assert!(reply.contains("🕒 2026-08-30"));
    }
}
