//! Typed errors for the I/O and network shells around the brief pipeline.
//!
//! The core (similarity, dedup, parsing, rendering) never fails; everything
//! that can fail lives at the edges and reports through [`BriefError`].

use thiserror::Error;

/// Errors raised by configuration loading, file output, scraping and LLM calls.
#[derive(Debug, Error)]
pub enum BriefError {
    /// Filesystem read/write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The LLM endpoint answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The LLM answered successfully but without any content.
    #[error("completion contained no content")]
    EmptyCompletion,

    /// A scraped link or configured endpoint was not a valid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A CSS selector failed to parse.
    #[error("invalid selector: {0}")]
    Selector(String),
}
