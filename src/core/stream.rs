use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

use super::quote::quote;

/// Formats the line emitted for a successfully fetched page, e.g.
/// `found: https://golang.org/ "The Go Programming Language"`. The body is quoted
/// with [`quote`].
pub fn format_result_line(url: &str, body: &str) -> String {
    format!("found: {} {}", url, quote(body))
}

/// Ordered result lines of one crawl branch and everything below it.
///
/// The stream ends when the producing branch drops its sender, which it does only
/// after every child stream has been drained into it.
#[derive(Debug)]
pub struct ResultStream {
    receiver: mpsc::Receiver<String>,
}

impl ResultStream {
    pub(crate) fn new(receiver: mpsc::Receiver<String>) -> Self {
        Self { receiver }
    }

    /// A stream that is already closed and yields nothing.
    pub fn empty() -> Self {
        let (_, receiver) = mpsc::channel(1);
        Self { receiver }
    }

    pub async fn next_line(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    pub async fn collect_lines(mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line().await {
            lines.push(line);
        }
        lines
    }
}

impl Stream for ResultStream {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.receiver.poll_recv(cx)
    }
}
