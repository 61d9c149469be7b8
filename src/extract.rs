use crate::types::SearchQuery;

/// Trigger keywords marking a message as a search request, in match order.
pub const SEARCH_TRIGGERS: &[&str] = &["搜索", "找资源", "下载", "资源", "search", "find"];

/// Type synonyms mapped to API file-type codes, in match order.
const FILE_TYPES: &[(&str, &str)] = &[
    ("电影", "video"),
    ("视频", "video"),
    ("影片", "video"),
    ("软件", "software"),
    ("程序", "software"),
    ("应用", "software"),
    ("文档", "document"),
    ("资料", "document"),
    ("教程", "document"),
    ("图片", "image"),
    ("照片", "image"),
    ("壁纸", "image"),
    ("音乐", "audio"),
    ("歌曲", "audio"),
    ("音频", "audio"),
    ("压缩包", "archive"),
    ("安装包", "archive"),
];

/// Time synonyms mapped to API recency codes, in match order.
const TIME_FILTERS: &[(&str, &str)] = &[
    ("今天", "today"),
    ("本周", "week"),
    ("本月", "month"),
    ("本年", "year"),
];

const QUOTE_CHARS: [char; 3] = ['"', '“', '”'];
const PUNCTUATION: &str = "：:，,。！!？?";

/// Whether any search trigger keyword appears in the message. Messages
/// without one are not search requests and must be ignored.
pub fn has_trigger(message: &str) -> bool {
    SEARCH_TRIGGERS.iter().any(|t| message.contains(t))
}

/// Turns a raw chat message into normalized search parameters.
///
/// Only the first matching entry of each synonym table is stripped, and all
/// of its occurrences are removed. A synonym appearing inside the intended
/// query text is stripped regardless, a known lossy heuristic. An empty
/// `text` in the returned query means the caller should reply with help.
pub fn extract_query(message: &str) -> SearchQuery {
    let mut text = message.trim().to_string();

    for trigger in SEARCH_TRIGGERS {
        if text.contains(trigger) {
            text = text.replace(trigger, "").trim().to_string();
            break;
        }
    }

    let mut file_type = String::new();
    for (name, code) in FILE_TYPES {
        if text.contains(name) {
            file_type = (*code).to_string();
            text = text.replace(name, "").trim().to_string();
            break;
        }
    }

    let mut time_filter = String::new();
    for (name, code) in TIME_FILTERS {
        if text.contains(name) {
            time_filter = (*code).to_string();
            text = text.replace(name, "").trim().to_string();
            break;
        }
    }

    let mut exact_match = false;
    if text.contains(&QUOTE_CHARS[..]) {
        exact_match = true;
        text = text.replace(&QUOTE_CHARS[..], "");
    }

    text.retain(|c| !PUNCTUATION.contains(c));

    SearchQuery {
        text: text.trim().to_string(),
        file_type,
        time_filter,
        exact_match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_trigger_anywhere_in_message() {
        assert!(has_trigger("帮我搜索一下"));
        assert!(has_trigger("please search this"));
        assert!(!has_trigger("你好"));
    }

    #[test]
    fn extracts_plain_query() {
        let query = extract_query("搜索 复仇者联盟");
        assert_eq!(query.text, "复仇者联盟");
        assert_eq!(query.file_type, "");
        assert_eq!(query.time_filter, "");
        assert!(!query.exact_match);
    }

    #[test]
    fn extracts_file_type_filter() {
        let query = extract_query("搜索 电影 复仇者联盟");
        assert_eq!(query.text, "复仇者联盟");
        assert_eq!(query.file_type, "video");
        assert_eq!(query.time_filter, "");
        assert!(!query.exact_match);
    }

    #[test]
    fn extracts_time_filter() {
        let query = extract_query("搜索 本月 Python教程");
        assert_eq!(query.time_filter, "month");
        // "教程" is also a type synonym and gets stripped from the text.
        assert_eq!(query.file_type, "document");
        assert_eq!(query.text, "Python");
    }

    #[test]
    fn quotes_set_exact_match_and_are_stripped() {
        let query = extract_query("搜索 \"Python 3.9\"");
        assert!(query.exact_match);
        assert_eq!(query.text, "Python 3.9");

        let curly = extract_query("搜索 “周杰伦”");
        assert!(curly.exact_match);
        assert_eq!(curly.text, "周杰伦");
    }

    #[test]
    fn strips_punctuation() {
        let query = extract_query("搜索：复仇者联盟！");
        assert_eq!(query.text, "复仇者联盟");
    }

    #[test]
    fn only_first_trigger_in_list_order_is_removed() {
        // "找资源" matches before the bare "资源" entry.
        let query = extract_query("找资源 壁纸 风景");
        assert_eq!(query.file_type, "image");
        assert_eq!(query.text, "风景");
    }

    #[test]
    fn trigger_only_message_yields_empty_text() {
        assert_eq!(extract_query("搜索").text, "");
        assert_eq!(extract_query("搜索  ").text, "");
    }

    #[test]
    fn idempotent_on_cleaned_text() {
        let first = extract_query("搜索 电影 复仇者联盟");
        let second = extract_query(&first.text);
        assert_eq!(second.text, first.text);
        assert_eq!(second.file_type, "");
        assert!(!second.exact_match);
    }
}
