pub mod fs;

use crate::services::{ContentFormat, ContentKind};
use anyhow::Result;

pub use fs::FsSource;

/// One content file as read from a source, before parsing
#[derive(Debug, Clone)]
pub struct RawEntry {
    /// File name without extension; the fallback slug
    pub name: String,
    pub format: ContentFormat,
    pub text: String,
    /// Human-readable origin used in log messages
    pub location: String,
}

impl RawEntry {
    pub fn new(name: impl Into<String>, format: ContentFormat, text: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            location: format!("{}.{}", name, format.extensions()[0]),
            name,
            format,
            text: text.into(),
        }
    }
}

/// Read-only access to authored content
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// List every entry of a kind in scan order.
    ///
    /// A kind with no entries (or no directory) yields an empty list.
    async fn list(&self, kind: ContentKind) -> Result<Vec<RawEntry>>;

    /// Fetch a single named entry of a kind
    async fn fetch(&self, kind: ContentKind, name: &str) -> Result<Option<RawEntry>>;
}
