//! Test utilities for the paddock crate
//!
//! Provides an in-memory `ContentSource` so loaders and stores can be
//! exercised without touching the filesystem.

use crate::services::{ContentFormat, ContentKind};
use crate::source::{ContentSource, RawEntry};
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory content source.
///
/// Entries are returned in insertion order. Kinds marked as failing return
/// an error from both `list` and `fetch`; the flag can be toggled at runtime
/// to simulate a source going away between loads.
#[derive(Default)]
pub struct InMemorySource {
    entries: Mutex<HashMap<ContentKind, Vec<RawEntry>>>,
    failing: Mutex<HashSet<ContentKind>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, kind: ContentKind, entry: RawEntry) -> Self {
        self.insert(kind, entry);
        self
    }

    pub fn with_json(self, kind: ContentKind, name: &str, text: &str) -> Self {
        self.with_entry(kind, RawEntry::new(name, ContentFormat::Json, text))
    }

    pub fn failing(self, kind: ContentKind) -> Self {
        self.set_failing(kind, true);
        self
    }

    /// Add or replace an entry by name
    pub fn insert(&self, kind: ContentKind, entry: RawEntry) {
        let mut entries = self.entries.lock().unwrap();
        let list = entries.entry(kind).or_default();
        match list.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => list.push(entry),
        }
    }

    pub fn set_failing(&self, kind: ContentKind, failing: bool) {
        let mut set = self.failing.lock().unwrap();
        if failing {
            set.insert(kind);
        } else {
            set.remove(&kind);
        }
    }

    fn check(&self, kind: ContentKind) -> Result<()> {
        if self.failing.lock().unwrap().contains(&kind) {
            return Err(anyhow::anyhow!("{} content unavailable", kind));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContentSource for InMemorySource {
    async fn list(&self, kind: ContentKind) -> Result<Vec<RawEntry>> {
        self.check(kind)?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch(&self, kind: ContentKind, name: &str) -> Result<Option<RawEntry>> {
        self.check(kind)?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&kind)
            .and_then(|list| list.iter().find(|e| e.name == name).cloned()))
    }
}
