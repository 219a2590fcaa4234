use crate::fetcher::{Fetcher, Page};
use crate::stats::StatsTracker;
use chrono::Utc;
use log::{debug, info, trace, warn};
use std::sync::Arc;
use tokio::spawn;
use tokio::sync::{mpsc, Semaphore};

use super::stream::format_result_line;
use super::{CrawlResult, CrawlerConfig, FetchResult, ResultStream, VisitedSet};

/// How a single branch of the crawl ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOutcome {
    DepthExceeded,
    AlreadyVisited,
    FetchFailed,
    /// Fetched, emitted its line and forwarded every child stream.
    Completed,
    /// The consumer of this branch's stream went away before it finished.
    Abandoned,
}

pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    config: CrawlerConfig,
    stats: Arc<StatsTracker>,
}

/// State shared by every branch of one crawl.
struct BranchContext {
    fetcher: Arc<dyn Fetcher>,
    visited: Arc<VisitedSet>,
    limiter: Option<Semaphore>,
    stats: Arc<StatsTracker>,
    channel_capacity: usize,
    log_duplicates: bool,
}

impl Crawler {
    pub fn new<F: Fetcher + 'static>(fetcher: F, config: CrawlerConfig) -> CrawlResult<Self> {
        config.validate()?;
        info!("Initializing crawler");
        debug!("Crawler config: {:?}", config);

        Ok(Self {
            fetcher: Arc::new(fetcher),
            config,
            stats: Arc::new(StatsTracker::new()),
        })
    }

    /// Crawler with the default configuration, which is always valid.
    pub fn with_default_config<F: Fetcher + 'static>(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config: CrawlerConfig::default(),
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// Crawls from `seed` down to the configured maximum depth.
    ///
    /// Must be called from within a tokio runtime.
    pub fn crawl(&self, seed: &str) -> ResultStream {
        self.crawl_with_depth(seed, self.config.max_depth)
    }

    pub fn crawl_with_depth(&self, seed: &str, max_depth: i32) -> ResultStream {
        self.crawl_branch(seed, max_depth, Arc::new(VisitedSet::new()))
    }

    /// Crawls from `url` with a caller-provided visited set. URLs already claimed in
    /// `visited` are treated as duplicates and never fetched.
    pub fn crawl_branch(&self, url: &str, max_depth: i32, visited: Arc<VisitedSet>) -> ResultStream {
        info!("Starting crawl from {} (max depth {})", url, max_depth);
        self.stats.record_crawl_started();

        let context = Arc::new(BranchContext {
            fetcher: Arc::clone(&self.fetcher),
            visited,
            limiter: self.config.max_concurrency.map(Semaphore::new),
            stats: Arc::clone(&self.stats),
            channel_capacity: self.config.channel_capacity,
            log_duplicates: self.config.log_duplicates,
        });

        spawn_branch(context, url.to_string(), max_depth, true)
    }
}

/// Crawls `seed` with `fetcher` using the default configuration and `max_depth`.
pub fn crawl<F: Fetcher + 'static>(seed: &str, max_depth: i32, fetcher: F) -> ResultStream {
    Crawler::with_default_config(fetcher).crawl_with_depth(seed, max_depth)
}

fn spawn_branch(context: Arc<BranchContext>, url: String, depth: i32, root: bool) -> ResultStream {
    let (sender, receiver) = mpsc::channel(context.channel_capacity);

    spawn(async move {
        let outcome = run_branch(&context, &url, depth, &sender).await;
        trace!("Branch {} at depth {} ended: {:?}", url, depth, outcome);
        context.stats.record_outcome(outcome);

        if root {
            context.stats.record_crawl_finished();
            info!(
                "Crawl from {} completed. Total URLs claimed: {}",
                url,
                context.visited.len()
            );
        }
        // Stats must be final before the consumer observes end of stream.
        drop(sender);
    });

    ResultStream::new(receiver)
}

async fn run_branch(
    context: &Arc<BranchContext>,
    url: &str,
    depth: i32,
    sender: &mpsc::Sender<String>,
) -> BranchOutcome {
    if depth < 0 {
        trace!("Skipping URL {} - max depth reached", url);
        return BranchOutcome::DepthExceeded;
    }

    if !context.visited.try_claim(url) {
        if context.log_duplicates {
            debug!("Duplicate URL {}", url);
        }
        return BranchOutcome::AlreadyVisited;
    }

    let page = match context.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Error fetching {}: {}", url, e);
            return BranchOutcome::FetchFailed;
        }
    };

    debug!(
        "Fetched {} at depth {} with {} outbound URLs",
        url,
        depth,
        page.urls.len()
    );

    if sender.send(format_result_line(url, &page.body)).await.is_err() {
        return BranchOutcome::Abandoned;
    }
    context.stats.record_line();

    let children: Vec<ResultStream> = page
        .urls
        .into_iter()
        .map(|child| spawn_branch(Arc::clone(context), child, depth - 1, false))
        .collect();

    for mut child in children {
        while let Some(line) = child.next_line().await {
            if sender.send(line).await.is_err() {
                debug!("Consumer of {} went away, abandoning remaining output", url);
                return BranchOutcome::Abandoned;
            }
        }
    }

    BranchOutcome::Completed
}

impl BranchContext {
    async fn fetch(&self, url: &str) -> FetchResult<Page> {
        // Held only for the fetch itself; forwarding child output never needs a permit.
        let _permit = match &self.limiter {
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        };

        let start_time = Utc::now();
        self.stats.record_fetch_started();
        let result = self.fetcher.fetch(url).await;
        let duration = Utc::now().signed_duration_since(start_time);
        self.stats.record_fetch_finished(result.is_ok(), duration);

        result
    }
}
