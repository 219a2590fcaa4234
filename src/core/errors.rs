use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("not found {0}")]
    NotFound(String),

    #[error("fetch failed for {url}: {reason}")]
    Failed { url: String, reason: String },
}

impl FetchError {
    pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::NotFound(url) | FetchError::Failed { url, .. } => url,
        }
    }
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CrawlResult<T> = Result<T, CrawlError>;
pub type FetchResult<T> = Result<T, FetchError>;
