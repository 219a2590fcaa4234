pub mod core;
pub mod fetcher;
pub mod stats;

pub mod examples;

pub use crate::core::{crawl, Crawler, CrawlerConfig};
pub use crate::core::{CrawlError, CrawlResult, FetchError, FetchResult};
pub use crate::core::{ResultStream, VisitedSet};
pub use fetcher::{Fetcher, FnFetcher, MockFetcher, Page};
pub use stats::StatsTracker;
