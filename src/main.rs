use depthcrawl::examples::{golang_fetcher, GOLANG_SEED};
use depthcrawl::{Crawler, CrawlerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::var("DEPTHCRAWL_CONFIG") {
        Ok(json) => CrawlerConfig::from_json(&json)?,
        Err(_) => CrawlerConfig::default().with_depth(4),
    };

    let crawler = Crawler::new(golang_fetcher(), config)?;
    let mut results = crawler.crawl(GOLANG_SEED);
    while let Some(line) = results.next_line().await {
        println!("{}", line);
    }

    crawler.stats().print_summary();
    Ok(())
}
