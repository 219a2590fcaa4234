use serde::{Deserialize, Serialize};

use super::{CrawlError, CrawlResult};

pub const DEFAULT_MAX_DEPTH: i32 = 4;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    pub max_depth: i32,
    /// Upper bound on in-flight fetches. `None` spawns and fetches without limit.
    pub max_concurrency: Option<usize>,
    /// Buffer size of each branch's result stream.
    pub channel_capacity: usize,
    pub log_duplicates: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_concurrency: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            log_duplicates: true,
        }
    }
}

impl CrawlerConfig {
    pub fn with_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }

    pub fn with_unbounded_concurrency(mut self) -> Self {
        self.max_concurrency = None;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_log_duplicates(mut self, log_duplicates: bool) -> Self {
        self.log_duplicates = log_duplicates;
        self
    }

    pub fn from_json(json: &str) -> CrawlResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CrawlResult<()> {
        if self.channel_capacity == 0 {
            return Err(CrawlError::InvalidConfig(
                "channel_capacity must be at least 1".to_string(),
            ));
        }
        if self.max_concurrency == Some(0) {
            return Err(CrawlError::InvalidConfig(
                "max_concurrency must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CrawlerConfig::default();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_concurrency, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = CrawlerConfig::default()
            .with_depth(2)
            .with_concurrency(8)
            .with_channel_capacity(1)
            .with_log_duplicates(false);

        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_concurrency, Some(8));
        assert_eq!(config.channel_capacity, 1);
        assert!(!config.log_duplicates);

        let config = config.with_unbounded_concurrency();
        assert_eq!(config.max_concurrency, None);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = CrawlerConfig::default().with_channel_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(CrawlError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let config = CrawlerConfig::default().with_concurrency(0);
        assert!(matches!(
            config.validate(),
            Err(CrawlError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = CrawlerConfig::from_json(r#"{"max_depth": 1, "max_concurrency": 3}"#).unwrap();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_concurrency, Some(3));
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
        assert!(config.log_duplicates);
    }

    #[test]
    fn test_from_json_validates() {
        let result = CrawlerConfig::from_json(r#"{"channel_capacity": 0}"#);
        assert!(matches!(result, Err(CrawlError::InvalidConfig(_))));

        let result = CrawlerConfig::from_json("not json");
        assert!(matches!(result, Err(CrawlError::Json(_))));
    }
}
