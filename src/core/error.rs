//! Error taxonomy for a single gather cycle.

use thiserror::Error;

/// Failure raised while building, sending or processing an exchange rate request.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Missing or invalid configuration, detected before any network activity.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The HTTP round trip could not be completed.
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with something other than `200 OK`.
    #[error("Unexpected response status: {status}")]
    Upstream { status: String, url: String },

    /// The response body could not be drained.
    #[error("Failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    /// The body parser rejected the payload.
    #[error("Failed to parse response body: {0:#}")]
    Parse(anyhow::Error),
}

/// An [`ExchangeError`] annotated with the URL that was attempted.
#[derive(Error, Debug)]
#[error("[url={url}]: {source}")]
pub struct GatherError {
    pub url: String,
    #[source]
    pub source: ExchangeError,
}

impl GatherError {
    pub fn new(url: impl Into<String>, source: ExchangeError) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}
