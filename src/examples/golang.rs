use crate::fetcher::MockFetcher;

pub const GOLANG_SEED: &str = "https://golang.org/";

/// The four-page golang.org site used by the demo binary. `https://golang.org/cmd/`
/// is linked from two pages but has no entry, so fetching it fails.
pub fn golang_fetcher() -> MockFetcher {
    MockFetcher::new()
        .with_page(
            "https://golang.org/",
            "The Go Programming Language",
            &["https://golang.org/pkg/", "https://golang.org/cmd/"],
        )
        .with_page(
            "https://golang.org/pkg/",
            "Packages",
            &[
                "https://golang.org/",
                "https://golang.org/cmd/",
                "https://golang.org/pkg/fmt/",
                "https://golang.org/pkg/os/",
            ],
        )
        .with_page(
            "https://golang.org/pkg/fmt/",
            "Package fmt",
            &["https://golang.org/", "https://golang.org/pkg/"],
        )
        .with_page(
            "https://golang.org/pkg/os/",
            "Package os",
            &["https://golang.org/", "https://golang.org/pkg/"],
        )
}
