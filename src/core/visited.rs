use parking_lot::Mutex;
use std::collections::HashMap;

/// URLs claimed during a single crawl, with the number of times each was claimed.
///
/// A count only ever moves from zero to one: the check and the increment happen
/// under one lock acquisition, so exactly one branch wins the claim for a URL.
#[derive(Debug, Default)]
pub struct VisitedSet {
    visits: Mutex<HashMap<String, usize>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the caller. Returns `false` if some branch already holds it.
    pub fn try_claim(&self, url: &str) -> bool {
        let mut visits = self.visits.lock();
        match visits.get(url) {
            Some(count) if *count > 0 => false,
            _ => {
                visits.insert(url.to_string(), 1);
                true
            }
        }
    }

    pub fn visit_count(&self, url: &str) -> usize {
        self.visits.lock().get(url).copied().unwrap_or(0)
    }

    pub fn is_claimed(&self, url: &str) -> bool {
        self.visit_count(url) > 0
    }

    pub fn len(&self) -> usize {
        self.visits.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.lock().is_empty()
    }

    /// Sorted snapshot of every claimed URL.
    pub fn claimed_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.visits.lock().keys().cloned().collect();
        urls.sort();
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_first_claim_wins() {
        let visited = VisitedSet::new();
        assert!(visited.is_empty());

        assert!(visited.try_claim("https://golang.org/"));
        assert!(!visited.try_claim("https://golang.org/"));
        assert!(visited.try_claim("https://golang.org/pkg/"));

        assert_eq!(visited.len(), 2);
        assert_eq!(visited.visit_count("https://golang.org/"), 1);
        assert_eq!(visited.visit_count("https://golang.org/cmd/"), 0);
        assert!(!visited.is_claimed("https://golang.org/cmd/"));
    }

    #[test]
    fn test_claimed_urls_sorted() {
        let visited = VisitedSet::new();
        visited.try_claim("c");
        visited.try_claim("a");
        visited.try_claim("b");
        visited.try_claim("a");

        assert_eq!(visited.claimed_urls(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_concurrent_claims_have_single_winner() {
        let visited = Arc::new(VisitedSet::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let visited = Arc::clone(&visited);
                let winners = Arc::clone(&winners);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        if visited.try_claim(&format!("url-{}", i)) {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 100);
        assert_eq!(visited.len(), 100);
        assert!((0..100).all(|i| visited.visit_count(&format!("url-{}", i)) == 1));
    }
}
