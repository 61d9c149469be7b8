pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod handler;
pub mod search;
pub mod store;
pub mod types;

use crate::config::Config;
use crate::store::Store;
use crate::types::ResultItem;
use std::time::Duration;

pub use error::BotError;

/// Shared application state, owned by the host for the process lifetime.
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub store: Store,
    /// TTL cache of normalized results, keyed by query + filters.
    pub search_cache: moka::future::Cache<String, Vec<ResultItem>>,
    /// Per-user results last shown, so 收藏[序号] can resolve a serial.
    pub last_results: moka::future::Cache<String, Vec<ResultItem>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(search::SEARCH_TIMEOUT_SECS))
            .build()?;
        let store = Store::open(&config.db_path)?;
        let ttl = Duration::from_secs(config.cache_ttl_secs);

        Ok(Self {
            http_client,
            store,
            search_cache: moka::future::Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
            last_results: moka::future::Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
            config,
        })
    }
}
