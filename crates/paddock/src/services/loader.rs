use super::records::{BlogPost, Facility, Horse, Record, Service, TeamMember, Testimonial};
use super::types::{ContentKind, SortPolicy};
use crate::source::{ContentSource, RawEntry};
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;

/// Reads content from a source and normalizes it into sorted records.
///
/// The loader holds no cache: every call goes back to the source.
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
}

impl ContentLoader {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Load every entry of `T`'s kind.
    ///
    /// Entries that fail to parse are logged and skipped. Only a failure to
    /// list the kind as a whole is returned as an error.
    pub async fn load_collection<T: Record>(&self) -> Result<Vec<T>> {
        let kind = T::KIND;
        let entries = self
            .source
            .list(kind)
            .await
            .with_context(|| format!("Failed to list {} content", kind))?;

        let total = entries.len();
        let mut records: Vec<T> = entries.iter().filter_map(parse_record::<T>).collect();
        sort_records(&mut records, kind.sort_policy());

        tracing::debug!(
            kind = %kind,
            loaded = records.len(),
            skipped = total - records.len(),
            "loaded content collection"
        );
        Ok(records)
    }

    pub async fn load_horses(&self) -> Result<Vec<Horse>> {
        self.load_collection().await
    }

    pub async fn load_services(&self) -> Result<Vec<Service>> {
        self.load_collection().await
    }

    pub async fn load_team_members(&self) -> Result<Vec<TeamMember>> {
        self.load_collection().await
    }

    pub async fn load_blog_posts(&self) -> Result<Vec<BlogPost>> {
        self.load_collection().await
    }

    pub async fn load_facilities(&self) -> Result<Vec<Facility>> {
        self.load_collection().await
    }

    pub async fn load_testimonials(&self) -> Result<Vec<Testimonial>> {
        self.load_collection().await
    }

    /// Load a single page document; `None` when absent or malformed
    pub async fn load_page(&self, name: &str) -> Result<Option<Value>> {
        self.load_document(ContentKind::Page, name).await
    }

    /// Load a single settings document; `None` when absent or malformed
    pub async fn load_setting(&self, name: &str) -> Result<Option<Value>> {
        self.load_document(ContentKind::Setting, name).await
    }

    async fn load_document(&self, kind: ContentKind, name: &str) -> Result<Option<Value>> {
        let entry = self
            .source
            .fetch(kind, name)
            .await
            .with_context(|| format!("Failed to fetch {} '{}'", kind, name))?;

        let Some(entry) = entry else {
            tracing::debug!(kind = %kind, name, "document not found");
            return Ok(None);
        };

        match entry.format.parse::<Value>(&entry.text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::error!(location = %entry.location, error = %e, "error loading {}", kind);
                Ok(None)
            },
        }
    }
}

/// Parse one entry and resolve its slug: an explicit `slug` wins, else the file name.
fn parse_record<T: Record>(entry: &RawEntry) -> Option<T> {
    match entry.format.parse::<T>(&entry.text) {
        Ok(mut record) => {
            if record.slug().trim().is_empty() {
                record.set_slug(entry.name.clone());
            }
            Some(record)
        },
        Err(e) => {
            tracing::error!(location = %entry.location, error = %e, "error loading content");
            None
        },
    }
}

/// Apply a kind's ordering. Both orderings are stable.
pub fn sort_records<T: Record>(records: &mut [T], policy: SortPolicy) {
    match policy {
        // Option orders None first, so comparing b to a puts undated records last.
        SortPolicy::NewestFirst => records.sort_by(|a, b| b.date().cmp(&a.date())),
        SortPolicy::ExplicitOrder => records.sort_by(|a, b| a.order().total_cmp(&b.order())),
        SortPolicy::Unsorted => {},
    }
}
