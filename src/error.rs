// Error types shared by the fetcher, extractor, driver and report writer.
// Field-level gaps never show up here: those are recovered with defaults.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid CSS selector: {0}")]
    Selector(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ScraperResult<T> = Result<T, ScraperError>;
