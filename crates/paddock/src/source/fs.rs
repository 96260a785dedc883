use super::{ContentSource, RawEntry};
use crate::services::{ContentFormat, ContentKind};
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem content source: one directory per kind under a content root
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: ContentKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Read one file into an entry. `Ok(None)` when the file does not exist.
    async fn read_entry(path: &Path, format: ContentFormat) -> Result<Option<RawEntry>> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            },
        };

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Some(RawEntry {
            name,
            format,
            text,
            location: path.display().to_string(),
        }))
    }
}

#[async_trait::async_trait]
impl ContentSource for FsSource {
    async fn list(&self, kind: ContentKind) -> Result<Vec<RawEntry>> {
        let dir = self.kind_dir(kind);
        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(kind = %kind, dir = %dir.display(), "content directory missing");
                return Ok(Vec::new());
            },
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read content directory {}", dir.display()))
            },
        };

        let mut candidates = Vec::new();
        while let Some(dir_entry) = read_dir
            .next_entry()
            .await
            .with_context(|| format!("Failed to scan {}", dir.display()))?
        {
            let path = dir_entry.path();
            let Some(format) = ContentFormat::from_path(&path) else {
                continue;
            };
            if dir_entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                candidates.push((path, format));
            }
        }

        // Scan order is file-name order, independent of the platform's directory order.
        candidates.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));

        let mut entries = Vec::with_capacity(candidates.len());
        for (path, format) in candidates {
            match Self::read_entry(&path, format).await {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {},
                Err(e) => tracing::error!(path = %path.display(), error = %e, "skipping unreadable content file"),
            }
        }

        Ok(entries)
    }

    async fn fetch(&self, kind: ContentKind, name: &str) -> Result<Option<RawEntry>> {
        let dir = self.kind_dir(kind);
        for format in [ContentFormat::Json, ContentFormat::Yaml] {
            for ext in format.extensions() {
                let path = dir.join(format!("{}.{}", name, ext));
                if let Some(entry) = Self::read_entry(&path, format).await? {
                    return Ok(Some(entry));
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn list_returns_entries_in_file_name_order() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "services/c-lessons.json", "{}");
        write(temp_dir.path(), "services/a-boarding.json", "{}");
        write(temp_dir.path(), "services/b-training.yml", "title: Training");

        let source = FsSource::new(temp_dir.path());
        let entries = source.list(ContentKind::Service).await.unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a-boarding", "b-training", "c-lessons"]);
        assert_eq!(entries[1].format, ContentFormat::Yaml);
    }

    #[tokio::test]
    async fn list_ignores_other_files_and_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "horses/star.json", "{}");
        write(temp_dir.path(), "horses/notes.md", "# notes");
        write(temp_dir.path(), "horses/archive/old.json", "{}");

        let source = FsSource::new(temp_dir.path());
        let entries = source.list(ContentKind::Horse).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "star");
    }

    #[tokio::test]
    async fn list_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let source = FsSource::new(temp_dir.path());

        let entries = source.list(ContentKind::Testimonial).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn list_fails_when_kind_path_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "blog", "not a directory");

        let source = FsSource::new(temp_dir.path());
        assert!(source.list(ContentKind::Blog).await.is_err());
    }

    #[tokio::test]
    async fn fetch_finds_named_entry() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "pages/home.json", r#"{"title": "Home"}"#);

        let source = FsSource::new(temp_dir.path());
        let entry = source.fetch(ContentKind::Page, "home").await.unwrap().unwrap();

        assert_eq!(entry.name, "home");
        assert_eq!(entry.format, ContentFormat::Json);
        assert!(entry.text.contains("Home"));
    }

    #[tokio::test]
    async fn fetch_falls_back_to_yaml() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "settings/seo.yaml", "keywords: [horses]");

        let source = FsSource::new(temp_dir.path());
        let entry = source.fetch(ContentKind::Setting, "seo").await.unwrap().unwrap();
        assert_eq!(entry.format, ContentFormat::Yaml);
    }

    #[tokio::test]
    async fn fetch_missing_entry_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let source = FsSource::new(temp_dir.path());

        let entry = source.fetch(ContentKind::Page, "contact").await.unwrap();
        assert!(entry.is_none());
    }
}
