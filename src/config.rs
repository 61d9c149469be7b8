use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://so.yuneu.com";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 1800;
pub const DEFAULT_PAGE_SIZE: u32 = 8;
pub const DEFAULT_DB_PATH: &str = "./data/netdisk_search.db";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the netdisk aggregator API.
    pub api_base_url: String,
    /// Lifetime of cached search results, in seconds.
    pub cache_ttl_secs: u64,
    /// Number of results requested per search.
    pub page_size: u32,
    /// Location of the SQLite database file.
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: get_env_or_default("NETDISK_API_URL", DEFAULT_API_BASE_URL),
            cache_ttl_secs: env::var("NETDISK_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            page_size: env::var("NETDISK_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE),
            db_path: PathBuf::from(get_env_or_default("NETDISK_DB_PATH", DEFAULT_DB_PATH)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://so.yuneu.com");
        assert_eq!(config.cache_ttl_secs, 1800);
        assert_eq!(config.page_size, 8);
        assert_eq!(config.db_path, PathBuf::from("./data/netdisk_search.db"));
    }
}
