use thiserror::Error;

/// Failures at the HTTP cache boundary. Callers wrap these in `anyhow` and the
/// UI only ever reports "failed".
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("http {status}: {body}")]
    Status { status: u16, body: String },

    #[error("received 304 without a cached body for {0}")]
    NotModifiedWithoutCache(String),

    #[error("empty response from {0}")]
    EmptyBody(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
