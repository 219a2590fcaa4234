use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::core::BranchOutcome;

/// Totals across every crawl run through one tracker.
///
/// `start_time` is when the tracker was created. `end_time` is set when the last
/// running crawl finishes and cleared again when another one starts.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub crawls_started: usize,
    pub active_crawls: usize,
    pub branches: usize,
    pub completed_branches: usize,
    pub failed_branches: usize,
    pub abandoned_branches: usize,
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub duplicates_skipped: usize,
    pub depth_cutoffs: usize,
    pub lines_emitted: usize,
    pub active_fetches: usize,
    pub peak_concurrent_fetches: usize,
    pub average_fetch_time: f64, // in milliseconds
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<CrawlStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(CrawlStats {
                start_time: Utc::now(),
                end_time: None,
                crawls_started: 0,
                active_crawls: 0,
                branches: 0,
                completed_branches: 0,
                failed_branches: 0,
                abandoned_branches: 0,
                pages_fetched: 0,
                fetch_failures: 0,
                duplicates_skipped: 0,
                depth_cutoffs: 0,
                lines_emitted: 0,
                active_fetches: 0,
                peak_concurrent_fetches: 0,
                average_fetch_time: 0.0,
            })),
        }
    }

    pub fn record_crawl_started(&self) {
        let mut stats = self.stats.write();
        stats.crawls_started += 1;
        stats.active_crawls += 1;
        stats.end_time = None;
    }

    /// Marks one crawl as done. `end_time` is only stamped once no crawl is running.
    pub fn record_crawl_finished(&self) {
        let mut stats = self.stats.write();
        stats.active_crawls = stats.active_crawls.saturating_sub(1);
        if stats.active_crawls == 0 {
            stats.end_time = Some(Utc::now());
        }
    }

    pub fn record_fetch_started(&self) {
        let mut stats = self.stats.write();
        stats.active_fetches += 1;
        stats.peak_concurrent_fetches = stats.peak_concurrent_fetches.max(stats.active_fetches);
    }

    pub fn record_fetch_finished(&self, success: bool, duration: Duration) {
        let mut stats = self.stats.write();
        stats.active_fetches = stats.active_fetches.saturating_sub(1);

        if success {
            stats.pages_fetched += 1;
        } else {
            stats.fetch_failures += 1;
        }

        // Running average over every completed fetch
        let completed = stats.pages_fetched + stats.fetch_failures;
        let current_total = stats.average_fetch_time * (completed - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_fetch_time = (current_total + new_duration) / completed as f64;
    }

    pub fn record_line(&self) {
        self.stats.write().lines_emitted += 1;
    }

    pub fn record_outcome(&self, outcome: BranchOutcome) {
        let mut stats = self.stats.write();
        stats.branches += 1;
        match outcome {
            BranchOutcome::DepthExceeded => stats.depth_cutoffs += 1,
            BranchOutcome::AlreadyVisited => stats.duplicates_skipped += 1,
            BranchOutcome::FetchFailed => stats.failed_branches += 1,
            BranchOutcome::Completed => stats.completed_branches += 1,
            BranchOutcome::Abandoned => stats.abandoned_branches += 1,
        }
    }

    pub fn get_stats(&self) -> CrawlStats {
        self.stats.read().clone()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.stats.read())
    }

    pub fn summary(&self) -> String {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        let mut out = String::new();
        out.push_str("Crawl Statistics:\n");
        out.push_str("=================\n");
        out.push_str(&format!("Duration: {} ms\n", duration.num_milliseconds()));
        out.push_str(&format!("Crawls Started: {}\n", stats.crawls_started));
        out.push_str(&format!("Active Crawls: {}\n", stats.active_crawls));
        out.push_str(&format!("Branches: {}\n", stats.branches));
        out.push_str(&format!("Completed Branches: {}\n", stats.completed_branches));
        out.push_str(&format!("Abandoned Branches: {}\n", stats.abandoned_branches));
        out.push_str(&format!("Pages Fetched: {}\n", stats.pages_fetched));
        out.push_str(&format!("Fetch Failures: {}\n", stats.fetch_failures));
        out.push_str(&format!("Duplicates Skipped: {}\n", stats.duplicates_skipped));
        out.push_str(&format!("Depth Cutoffs: {}\n", stats.depth_cutoffs));
        out.push_str(&format!("Lines Emitted: {}\n", stats.lines_emitted));
        out.push_str(&format!(
            "Peak Concurrent Fetches: {}\n",
            stats.peak_concurrent_fetches
        ));
        out.push_str(&format!(
            "Average Fetch Time: {:.2}ms\n",
            stats.average_fetch_time
        ));
        out
    }

    pub fn print_summary(&self) {
        println!("\n{}", self.summary());
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_are_counted() {
        let tracker = StatsTracker::new();
        tracker.record_crawl_started();
        tracker.record_outcome(BranchOutcome::Completed);
        tracker.record_outcome(BranchOutcome::AlreadyVisited);
        tracker.record_outcome(BranchOutcome::AlreadyVisited);
        tracker.record_outcome(BranchOutcome::DepthExceeded);
        tracker.record_outcome(BranchOutcome::FetchFailed);

        let stats = tracker.get_stats();
        assert_eq!(stats.crawls_started, 1);
        assert_eq!(stats.branches, 5);
        assert_eq!(stats.duplicates_skipped, 2);
        assert_eq!(stats.depth_cutoffs, 1);
        assert_eq!(stats.failed_branches, 1);
        assert_eq!(stats.completed_branches, 1);
        assert_eq!(stats.abandoned_branches, 0);
    }

    #[test]
    fn test_end_time_waits_for_every_crawl() {
        let tracker = StatsTracker::new();
        tracker.record_crawl_started();
        tracker.record_crawl_started();

        tracker.record_crawl_finished();
        let stats = tracker.get_stats();
        assert_eq!(stats.active_crawls, 1);
        assert!(stats.end_time.is_none());

        tracker.record_crawl_finished();
        let stats = tracker.get_stats();
        assert_eq!(stats.active_crawls, 0);
        assert!(stats.end_time.is_some());

        tracker.record_crawl_started();
        assert!(tracker.get_stats().end_time.is_none());
    }

    #[test]
    fn test_fetch_tracking() {
        let tracker = StatsTracker::new();
        tracker.record_fetch_started();
        tracker.record_fetch_started();
        tracker.record_fetch_finished(true, Duration::milliseconds(10));
        tracker.record_fetch_started();
        tracker.record_fetch_finished(false, Duration::milliseconds(30));
        tracker.record_fetch_finished(true, Duration::milliseconds(20));

        let stats = tracker.get_stats();
        assert_eq!(stats.pages_fetched, 2);
        assert_eq!(stats.fetch_failures, 1);
        assert_eq!(stats.active_fetches, 0);
        assert_eq!(stats.peak_concurrent_fetches, 2);
        assert!((stats.average_fetch_time - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_and_json() {
        let tracker = StatsTracker::new();
        tracker.record_crawl_started();
        tracker.record_line();
        tracker.record_crawl_finished();

        assert!(tracker.summary().contains("Lines Emitted: 1"));
        let json: serde_json::Value = serde_json::from_str(&tracker.to_json().unwrap()).unwrap();
        assert_eq!(json["lines_emitted"], 1);
        assert!(!json["end_time"].is_null());
    }
}
