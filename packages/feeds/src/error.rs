use thiserror::Error;

/// Errors of a single feed. Hydration collects these instead of failing.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Unparseable feed {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Request for {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Feed error: {0}")]
    Generic(String),
}

impl From<String> for FeedError {
    fn from(s: String) -> Self {
        FeedError::Generic(s)
    }
}

impl From<&str> for FeedError {
    fn from(s: &str) -> Self {
        FeedError::Generic(s.to_string())
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
