//! Error types for jellygate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Fatal at startup: a required setting is missing or unparseable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Non-fatal: a request to Jellyfin or SABnzbd failed (timeout,
    /// connection refused, non-2xx). The tick is skipped.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-fatal: a collaborator answered with JSON we can't make sense of.
    /// The tick is skipped.
    #[error("unexpected response: {0}")]
    Response(String),
}

pub type Result<T> = std::result::Result<T, Error>;
