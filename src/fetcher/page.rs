use serde::{Deserialize, Serialize};

/// A successfully fetched page: its body and outbound links in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub body: String,
    pub urls: Vec<String>,
}

impl Page {
    pub fn new(body: impl Into<String>, urls: Vec<String>) -> Self {
        Self {
            body: body.into(),
            urls,
        }
    }

    pub fn leaf(body: impl Into<String>) -> Self {
        Self::new(body, Vec::new())
    }
}
