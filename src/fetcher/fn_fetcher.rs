use crate::core::FetchResult;
use async_trait::async_trait;

use super::{Fetcher, Page};

/// Adapts a plain function into a [`Fetcher`], useful for generated graphs that are
/// too large (or infinite) to spell out page by page.
pub struct FnFetcher<F> {
    fetch_fn: F,
}

impl<F> FnFetcher<F>
where
    F: Fn(&str) -> FetchResult<Page> + Send + Sync,
{
    pub fn new(fetch_fn: F) -> Self {
        Self { fetch_fn }
    }
}

#[async_trait]
impl<F> Fetcher for FnFetcher<F>
where
    F: Fn(&str) -> FetchResult<Page> + Send + Sync,
{
    async fn fetch(&self, url: &str) -> FetchResult<Page> {
        (self.fetch_fn)(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FetchError;

    #[tokio::test]
    async fn test_fn_fetcher_delegates() {
        let fetcher = FnFetcher::new(|url: &str| {
            if url == "bad" {
                Err(FetchError::NotFound(url.to_string()))
            } else {
                Ok(Page::new(url.to_uppercase(), vec![format!("{}/next", url)]))
            }
        });

        let page = fetcher.fetch("a").await.unwrap();
        assert_eq!(page.body, "A");
        assert_eq!(page.urls, vec!["a/next"]);
        assert_eq!(
            fetcher.fetch("bad").await,
            Err(FetchError::NotFound("bad".to_string()))
        );
    }
}
