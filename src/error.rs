use thiserror::Error;

/// Failure kinds at the I/O boundaries. The message handler collapses these
/// into user-facing reply strings; none of them is allowed to escape it.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("search request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("search API returned status {0}")]
    Status(u16),

    #[error("unexpected response shape: {0}")]
    Parse(String),

    #[error("storage operation failed: {0}")]
    Storage(#[from] rusqlite::Error),
}
