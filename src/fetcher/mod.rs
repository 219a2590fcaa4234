mod fetcher;
pub mod fn_fetcher;
pub mod mock_fetcher;
mod page;

pub use fetcher::Fetcher;
pub use fn_fetcher::FnFetcher;
pub use mock_fetcher::{MockFetcher, MockPage};
pub use page::Page;
