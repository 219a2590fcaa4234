use crate::core::FetchResult;
use async_trait::async_trait;
use std::sync::Arc;

use super::Page;

/// Source of pages for the crawler.
///
/// Implementations may block, sleep or perform I/O. The crawler calls `fetch` at
/// most once per URL per crawl and never retries a failure.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<Page>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, url: &str) -> FetchResult<Page> {
        (**self).fetch(url).await
    }
}
