pub mod golang;

pub use golang::{golang_fetcher, GOLANG_SEED};
