use crate::core::{FetchError, FetchResult};
use async_trait::async_trait;
use log::trace;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::{Fetcher, Page};

#[derive(Debug, Clone)]
pub struct MockPage {
    pub body: String,
    pub urls: Vec<String>,
    pub delay: Option<Duration>,
    pub failure: Option<String>,
}

/// In-memory page graph. Unknown URLs fail with [`FetchError::NotFound`].
///
/// Clones share the same call counters, so a test can hand one clone to the crawler
/// and inspect another afterwards.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    pages: Arc<HashMap<String, MockPage>>,
    fetch_counts: Arc<RwLock<HashMap<String, usize>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: &str, urls: &[&str]) -> Self {
        self.insert(
            url,
            MockPage {
                body: body.to_string(),
                urls: urls.iter().map(|u| u.to_string()).collect(),
                delay: None,
                failure: None,
            },
        )
    }

    pub fn with_delayed_page(self, url: &str, body: &str, urls: &[&str], delay: Duration) -> Self {
        self.insert(
            url,
            MockPage {
                body: body.to_string(),
                urls: urls.iter().map(|u| u.to_string()).collect(),
                delay: Some(delay),
                failure: None,
            },
        )
    }

    /// Registers `url` as known but failing with [`FetchError::Failed`].
    pub fn with_failure(self, url: &str, reason: &str) -> Self {
        self.insert(
            url,
            MockPage {
                body: String::new(),
                urls: Vec::new(),
                delay: None,
                failure: Some(reason.to_string()),
            },
        )
    }

    fn insert(mut self, url: &str, page: MockPage) -> Self {
        Arc::make_mut(&mut self.pages).insert(url.to_string(), page);
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetch_counts.read().get(url).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetch_counts.read().values().sum()
    }

    pub fn fetch_counts(&self) -> HashMap<String, usize> {
        self.fetch_counts.read().clone()
    }

    /// Highest number of `fetch` calls that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Page> {
        *self.fetch_counts.write().entry(url.to_string()).or_insert(0) += 1;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        trace!("Mock fetch {} ({} in flight)", url, current);

        let result = match self.pages.get(url) {
            Some(page) => {
                if let Some(delay) = page.delay {
                    sleep(delay).await;
                }
                match &page.failure {
                    Some(reason) => Err(FetchError::failed(url, reason.clone())),
                    None => Ok(Page::new(page.body.clone(), page.urls.clone())),
                }
            }
            None => Err(FetchError::NotFound(url.to_string())),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
