mod config;
mod crawler;
mod errors;
mod quote;
mod stream;
mod visited;

pub use config::{CrawlerConfig, DEFAULT_CHANNEL_CAPACITY, DEFAULT_MAX_DEPTH};
pub use crawler::{crawl, BranchOutcome, Crawler};
pub use quote::quote;
pub use errors::{CrawlError, CrawlResult, FetchError, FetchResult};
pub use stream::{format_result_line, ResultStream};
pub use visited::VisitedSet;
